use thiserror::Error;

use fakeapi_core::Error as CoreError;

/// Errors raised by schema stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The write would break an identity invariant (duplicate id or endpoint).
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid store state: {0}")]
    Invalid(String),
    /// A schema rule checked under the store lock failed (e.g. plan quota).
    #[error(transparent)]
    Rule(#[from] CoreError),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
