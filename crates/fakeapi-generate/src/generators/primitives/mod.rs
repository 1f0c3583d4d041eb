use chrono::{DateTime, Utc};
use rand::Rng;

use crate::generators::{Generator, GeneratorContext, GeneratorRegistry, pick};
use crate::value::GeneratedValue;
use crate::vocab::FILLER_WORDS;

const MIN_WORDS: usize = 3;
const MAX_WORDS: usize = 7;
const NUMBER_MAX: i64 = 999;
/// 2020-01-01T00:00:00Z
const DATE_START_MILLIS: i64 = 1_577_836_800_000;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(StringGenerator));
    registry.register_generator(Box::new(NumberGenerator));
    registry.register_generator(Box::new(BooleanGenerator));
    registry.register_generator(Box::new(DateGenerator));
    registry.register_generator(Box::new(UuidGenerator));
}

pub(crate) fn lorem_words(rng: &mut dyn rand::RngCore) -> String {
    let count = rng.random_range(MIN_WORDS..=MAX_WORDS);
    (0..count)
        .map(|_| pick(FILLER_WORDS, rng))
        .collect::<Vec<_>>()
        .join(" ")
}

struct StringGenerator;

impl Generator for StringGenerator {
    fn id(&self) -> &'static str {
        "string"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        GeneratedValue::Text(lorem_words(rng))
    }
}

struct NumberGenerator;

impl Generator for NumberGenerator {
    fn id(&self) -> &'static str {
        "number"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        GeneratedValue::Int(rng.random_range(0..=NUMBER_MAX))
    }
}

struct BooleanGenerator;

impl Generator for BooleanGenerator {
    fn id(&self) -> &'static str {
        "boolean"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        GeneratedValue::Bool(rng.random_bool(0.5))
    }
}

struct DateGenerator;

impl Generator for DateGenerator {
    fn id(&self) -> &'static str {
        "date"
    }

    fn generate(&self, ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let end = ctx.now.timestamp_millis();
        let millis = if end > DATE_START_MILLIS {
            rng.random_range(DATE_START_MILLIS..=end)
        } else {
            DATE_START_MILLIS
        };
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(ctx.now);
        GeneratedValue::Timestamp(timestamp)
    }
}

struct UuidGenerator;

impl Generator for UuidGenerator {
    fn id(&self) -> &'static str {
        "uuid"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        GeneratedValue::Text(uuid.to_string())
    }
}
