//! Core contracts and helpers for fakeapi.
//!
//! This crate defines the schema types users author, the endpoint slug rules,
//! and the validation and quota checks shared by the store, the server, and
//! the CLI.

pub mod error;
pub mod quota;
pub mod schema;
pub mod slug;
pub mod validation;

pub use error::{Error, Result};
pub use quota::{DEFAULT_FREE_TIER_LIMIT, check_quota};
pub use schema::{ApiSchema, FieldDefinition, FieldType, Plan};
pub use slug::endpoint_id_from_name;
pub use validation::{
    RESERVED_ENDPOINT_IDS, RESERVED_FIELD_NAMES, validate_endpoint_id, validate_fields,
    validate_schema,
};
