//! Fake record generation for fakeapi.
//!
//! A [`GeneratorRegistry`] maps field type tags to value generators, and the
//! [`GenerationEngine`] turns a schema's field list into a page of synthetic
//! records using an injected [`RandomSource`].

pub mod engine;
pub mod generators;
pub mod page;
pub mod random;
pub mod value;
pub mod vocab;

pub use engine::GenerationEngine;
pub use generators::{FALLBACK_GENERATOR_ID, Generator, GeneratorContext, GeneratorRegistry};
pub use page::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageMeta, PageRequest, PageResponse, Record,
    generate_page,
};
pub use random::RandomSource;
pub use value::GeneratedValue;
