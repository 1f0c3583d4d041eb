use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use fakeapi_core::Error as CoreError;
use fakeapi_store::StoreError;

pub const API_NOT_FOUND: &str = "API not found";
pub const INVALID_BODY: &str = "Invalid request body";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Request-level error taxonomy; each variant maps to one HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    /// The owner reached the schema cap of their plan.
    #[error("{0}")]
    QuotaExceeded(String),
    /// Unknown endpoint or schema id.
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// Unexpected fault in a collaborator. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for request handling.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn api_not_found() -> Self {
        ApiError::NotFound(API_NOT_FOUND.to_string())
    }

    pub fn invalid_body() -> Self {
        ApiError::Validation(INVALID_BODY.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::QuotaExceeded(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Single-line message returned to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidSchema(message) => ApiError::Validation(message),
            quota @ CoreError::QuotaExceeded { .. } => ApiError::QuotaExceeded(quota.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::Validation(value.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(message) => ApiError::Validation(message),
            StoreError::Rule(rule) => ApiError::from(rule),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(event = "request_failed", status = status.as_u16(), error = %self);
        } else {
            warn!(event = "request_rejected", status = status.as_u16(), error = %self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
