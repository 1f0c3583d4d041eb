use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use fakeapi_core::FieldType;

use crate::value::GeneratedValue;

pub mod primitives;
pub mod semantic;

/// Generator used for tags nothing is registered under.
pub const FALLBACK_GENERATOR_ID: &str = "string";

/// Inputs shared by every generator call within one request.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext {
    /// Wall-clock time the request started; upper bound for dates.
    pub now: DateTime<Utc>,
}

impl GeneratorContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

/// A value generator for one field type tag.
pub trait Generator: Send + Sync {
    /// Type tag this generator is registered under.
    fn id(&self) -> &'static str;

    fn generate(&self, ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue;
}

/// Registry mapping type tags to generators.
pub struct GeneratorRegistry {
    generators: HashMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry with every built-in generator.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        primitives::register(&mut registry);
        semantic::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.id(), generator);
    }

    pub fn generator(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(|generator| generator.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.generators.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Produce one value for `tag`. Unregistered tags use the string generator.
    pub fn generate(
        &self,
        tag: &str,
        ctx: &GeneratorContext,
        rng: &mut dyn rand::RngCore,
    ) -> GeneratedValue {
        match self
            .generator(tag)
            .or_else(|| self.generator(FALLBACK_GENERATOR_ID))
        {
            Some(generator) => generator.generate(ctx, rng),
            None => GeneratedValue::Text(primitives::lorem_words(rng)),
        }
    }

    pub fn generate_field(
        &self,
        field_type: &FieldType,
        ctx: &GeneratorContext,
        rng: &mut dyn rand::RngCore,
    ) -> GeneratedValue {
        self.generate(field_type.tag(), ctx, rng)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.ids())
            .finish()
    }
}

pub(crate) fn pick<'a>(values: &[&'a str], rng: &mut dyn rand::RngCore) -> &'a str {
    if values.is_empty() {
        return "";
    }
    values[rng.random_range(0..values.len())]
}
