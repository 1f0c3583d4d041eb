use rand::Rng;

use crate::generators::{Generator, GeneratorContext, GeneratorRegistry, pick};
use crate::value::GeneratedValue;
use crate::vocab::{
    EMAIL_DOMAINS, EMAIL_NAMES, FIRST_NAMES, IMAGE_HOST, IMAGE_SIZES, LAST_NAMES, URL_DOMAINS,
    URL_PATHS,
};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(EmailGenerator));
    registry.register_generator(Box::new(NameGenerator));
    registry.register_generator(Box::new(PhoneGenerator));
    registry.register_generator(Box::new(UrlGenerator));
    registry.register_generator(Box::new(ImageGenerator));
}

struct EmailGenerator;

impl Generator for EmailGenerator {
    fn id(&self) -> &'static str {
        "email"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let name = pick(EMAIL_NAMES, rng);
        let domain = pick(EMAIL_DOMAINS, rng);
        let suffix = rng.random_range(0..=999);
        GeneratedValue::Text(format!("{name}{suffix}@{domain}"))
    }
}

struct NameGenerator;

impl Generator for NameGenerator {
    fn id(&self) -> &'static str {
        "name"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let first = pick(FIRST_NAMES, rng);
        let last = pick(LAST_NAMES, rng);
        GeneratedValue::Text(format!("{first} {last}"))
    }
}

/// Brazilian-style landline/mobile layout: `(DD) PPPPP-SSSS`.
struct PhoneGenerator;

impl Generator for PhoneGenerator {
    fn id(&self) -> &'static str {
        "phone"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let ddd = rng.random_range(10..=99);
        let prefix = rng.random_range(10000..=99999);
        let suffix = rng.random_range(1000..=9999);
        GeneratedValue::Text(format!("({ddd}) {prefix}-{suffix}"))
    }
}

struct UrlGenerator;

impl Generator for UrlGenerator {
    fn id(&self) -> &'static str {
        "url"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let domain = pick(URL_DOMAINS, rng);
        let path = pick(URL_PATHS, rng);
        GeneratedValue::Text(format!("https://{domain}/{path}"))
    }
}

struct ImageGenerator;

impl Generator for ImageGenerator {
    fn id(&self) -> &'static str {
        "image"
    }

    fn generate(&self, _ctx: &GeneratorContext, rng: &mut dyn rand::RngCore) -> GeneratedValue {
        let width = IMAGE_SIZES[rng.random_range(0..IMAGE_SIZES.len())];
        let height = IMAGE_SIZES[rng.random_range(0..IMAGE_SIZES.len())];
        GeneratedValue::Text(format!("https://{IMAGE_HOST}/{width}/{height}"))
    }
}
