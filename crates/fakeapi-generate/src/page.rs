use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fakeapi_core::FieldDefinition;

use crate::generators::{GeneratorContext, GeneratorRegistry};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Multiplier behind the synthetic `total` reported in page metadata.
const SIMULATED_TOTAL_FACTOR: u64 = 10;

/// One generated record: `id` first, then one value per field in schema order.
pub type Record = Map<String, Value>;

/// Normalized pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Records per page.
    pub count: u64,
}

impl PageRequest {
    /// Clamp raw values: `page >= 1`, `1 <= count <= max_page_size`.
    pub fn new(page: i64, count: i64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.max(1);
        let page = u64::try_from(page).unwrap_or(0).max(1);
        let count = u64::try_from(count).unwrap_or(0).clamp(1, max_page_size);
        Self { page, count }
    }

    /// Build from raw query-string values. Missing or unparsable values use
    /// the defaults before clamping.
    pub fn from_query(page: Option<&str>, count: Option<&str>, max_page_size: u64) -> Self {
        let page = parse_or(page, DEFAULT_PAGE as i64);
        let count = parse_or(count, DEFAULT_PAGE_SIZE as i64);
        Self::new(page, count, max_page_size)
    }

    /// Record id of the `index`-th record on this page.
    pub fn record_id(&self, index: u64) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.count)
            .saturating_add(index)
            .saturating_add(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            count: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_leading_int).unwrap_or(default)
}

/// Integer value of the leading `[+-]?[0-9]+` of `raw`, after leading
/// whitespace. Trailing characters are ignored and out-of-range values
/// saturate, so `"5abc"` is 5, `"3.7"` is 3 and a 30-digit count is `i64::MAX`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }

    match trimmed[..sign_len + digits_len].parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Pagination metadata. `total` is a simulated estimate, not a real count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub count: u64,
    pub total: u64,
}

/// A page of generated records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub data: Vec<Record>,
    pub meta: PageMeta,
}

/// Generate one page of records for `fields`.
pub fn generate_page(
    fields: &[FieldDefinition],
    request: PageRequest,
    registry: &GeneratorRegistry,
    ctx: &GeneratorContext,
    rng: &mut dyn rand::RngCore,
) -> PageResponse {
    let data = (0..request.count)
        .map(|index| {
            let mut record = Record::new();
            record.insert("id".to_string(), Value::from(request.record_id(index)));
            for field in fields {
                let value = registry.generate_field(&field.field_type, ctx, rng);
                record.insert(field.name.clone(), value.to_json());
            }
            record
        })
        .collect();

    PageResponse {
        data,
        meta: PageMeta {
            page: request.page,
            count: request.count,
            total: request.count.saturating_mul(SIMULATED_TOTAL_FACTOR),
        },
    }
}
