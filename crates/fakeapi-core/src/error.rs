use thiserror::Error;

/// Core error type shared across fakeapi crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The schema violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The owner reached the schema cap of their plan.
    #[error("free plan limit of {limit} APIs reached, upgrade to Pro")]
    QuotaExceeded { limit: usize },
}

/// Convenience alias for results returned by fakeapi crates.
pub type Result<T> = std::result::Result<T, Error>;
