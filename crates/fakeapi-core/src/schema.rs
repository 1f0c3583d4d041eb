use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type tag of a schema field.
///
/// Tags outside the known set are kept verbatim in `Other` so a stored schema
/// round-trips unchanged; generation treats them like `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Email,
    Name,
    Phone,
    Date,
    Url,
    Uuid,
    Image,
    Other(String),
}

impl FieldType {
    /// Every recognized tag, in the order they are offered to users.
    pub const KNOWN: [FieldType; 10] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Email,
        FieldType::Name,
        FieldType::Phone,
        FieldType::Date,
        FieldType::Url,
        FieldType::Uuid,
        FieldType::Image,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "email" => FieldType::Email,
            "name" => FieldType::Name,
            "phone" => FieldType::Phone,
            "date" => FieldType::Date,
            "url" => FieldType::Url,
            "uuid" => FieldType::Uuid,
            "image" => FieldType::Image,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Email => "email",
            FieldType::Name => "name",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Url => "url",
            FieldType::Uuid => "uuid",
            FieldType::Image => "image",
            FieldType::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Other(_))
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        FieldType::from_tag(&value)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named, typed field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A user-defined fake API: the record shape served under `endpoint_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSchema {
    /// Store identifier of the schema.
    pub id: String,
    /// Owning account.
    pub user_id: String,
    /// Display name; the endpoint identifier is derived from it.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Public URL shown to the owner.
    pub endpoint: String,
    /// URL-safe slug routing public requests to this schema.
    pub endpoint_id: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Subscription plan of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}
