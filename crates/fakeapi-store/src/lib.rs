//! Schema storage backends.
//!
//! The record server only needs the narrow [`SchemaStore`] contract: lookups
//! by endpoint, id, and owner, plus insert/update/delete and owner plans.

pub mod atomic;
pub mod error;
pub mod file;
pub mod memory;
mod state;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileSchemaStore;
pub use memory::InMemorySchemaStore;
pub use store::SchemaStore;
