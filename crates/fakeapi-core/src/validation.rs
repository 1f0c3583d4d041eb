use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::{ApiSchema, FieldDefinition};

/// Field names that collide with keys the record server writes itself.
pub const RESERVED_FIELD_NAMES: &[&str] = &["id"];

/// Endpoint identifiers shadowed by the schema management routes.
pub const RESERVED_ENDPOINT_IDS: &[&str] = &["apis"];

/// Validate the field list of a schema.
///
/// This checks:
/// - every field name is non-empty after trimming
/// - no two names collide under case-insensitive comparison
/// - no name shadows the generated record `id`
pub fn validate_fields(fields: &[FieldDefinition]) -> Result<()> {
    let mut seen = BTreeSet::new();

    for (index, field) in fields.iter().enumerate() {
        let name = field.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "field #{} has an empty name",
                index + 1
            )));
        }

        let folded = name.to_lowercase();
        if RESERVED_FIELD_NAMES.contains(&folded.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "field name is reserved: {name}"
            )));
        }
        if !seen.insert(folded) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field name: {name}"
            )));
        }
    }

    Ok(())
}

/// Validate an endpoint identifier derived from a schema name.
pub fn validate_endpoint_id(endpoint_id: &str) -> Result<()> {
    if endpoint_id.is_empty() {
        return Err(Error::InvalidSchema(
            "name must contain at least one letter or digit".to_string(),
        ));
    }
    if RESERVED_ENDPOINT_IDS.contains(&endpoint_id) {
        return Err(Error::InvalidSchema(format!(
            "endpoint identifier is reserved: {endpoint_id}"
        )));
    }
    Ok(())
}

/// Validate internal consistency of a schema before it is stored.
pub fn validate_schema(schema: &ApiSchema) -> Result<()> {
    if schema.user_id.trim().is_empty() {
        return Err(Error::InvalidSchema("owner must not be empty".to_string()));
    }
    if schema.name.trim().is_empty() {
        return Err(Error::InvalidSchema("name must not be empty".to_string()));
    }
    if schema.endpoint.trim().is_empty() {
        return Err(Error::InvalidSchema("endpoint must not be empty".to_string()));
    }
    validate_endpoint_id(&schema.endpoint_id)?;
    validate_fields(&schema.fields)
}
