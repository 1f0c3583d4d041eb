use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Generated value for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl GeneratedValue {
    /// JSON form served to clients. Timestamps use millisecond RFC 3339 with `Z`.
    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Bool(value) => Value::Bool(*value),
            GeneratedValue::Int(value) => Value::from(*value),
            GeneratedValue::Text(value) => Value::String(value.clone()),
            GeneratedValue::Timestamp(value) => {
                Value::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<GeneratedValue> for Value {
    fn from(value: GeneratedValue) -> Self {
        value.to_json()
    }
}
