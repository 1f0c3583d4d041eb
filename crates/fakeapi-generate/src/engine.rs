use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use fakeapi_core::{FieldDefinition, FieldType};

use crate::generators::{GeneratorContext, GeneratorRegistry};
use crate::page::{PageRequest, PageResponse, generate_page};
use crate::random::RandomSource;
use crate::value::GeneratedValue;

/// Upper bound (exclusive) of the ids handed to simulated record creation.
const ECHO_ID_MAX: u64 = 10_000;

/// Entry point for generating values and pages with an injected random source.
#[derive(Debug)]
pub struct GenerationEngine {
    registry: GeneratorRegistry,
    random: RandomSource,
}

impl GenerationEngine {
    pub fn new(random: RandomSource) -> Self {
        Self::with_registry(GeneratorRegistry::new(), random)
    }

    pub fn with_registry(registry: GeneratorRegistry, random: RandomSource) -> Self {
        Self { registry, random }
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn random(&self) -> &RandomSource {
        &self.random
    }

    /// Generate a single value for `field_type`.
    pub fn generate_value(&self, field_type: &FieldType) -> GeneratedValue {
        let mut rng = self.random.fork();
        self.registry
            .generate_field(field_type, &GeneratorContext::now(), &mut rng)
    }

    /// Generate a page of records, with `now` as the clock reading.
    pub fn generate_page_at(
        &self,
        fields: &[FieldDefinition],
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> PageResponse {
        let start = Instant::now();
        let mut rng = self.random.fork();
        let ctx = GeneratorContext::new(now);
        let page = generate_page(fields, request, &self.registry, &ctx, &mut rng);

        debug!(
            page = request.page,
            count = request.count,
            fields = fields.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "page generated"
        );
        page
    }

    pub fn generate_page(&self, fields: &[FieldDefinition], request: PageRequest) -> PageResponse {
        self.generate_page_at(fields, request, Utc::now())
    }

    /// Random id attached to a simulated record creation.
    pub fn echo_id(&self) -> u64 {
        self.random.fork().random_range(0..ECHO_ID_MAX)
    }
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::new(RandomSource::default())
    }
}
