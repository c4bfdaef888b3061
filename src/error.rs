//! Error types for the review cache service
//!
//! `CacheError` covers the cache layer, `ApiError` the HTTP layer on top of it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors raised by `TtlCache` and the key builder.
///
/// Misses, expiry and eviction are not errors; they surface as `None`/`false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction options are unusable
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// Key is empty or too long
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Per-entry TTL is unusable
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// The cache was destroyed and can no longer be used
    #[error("Cache destroyed")]
    Destroyed,
}

/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache layer failure
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cache(CacheError::InvalidKey(_) | CacheError::InvalidTtl(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Cache(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// == Data Error Enum ==
/// Errors raised while loading a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Dataset parsed but is inconsistent
    #[error("Invalid dataset: {0}")]
    Invalid(String),
}
