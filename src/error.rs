//! Error types for the signal cache
//!
//! Storage and cache errors are diagnostics: the cache absorbs them and only
//! logs them. `ApiError` is the one that reaches HTTP clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error ==
/// Failure at the key-value storage boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write would push the store past its byte quota
    #[error("Storage quota exceeded: needed {needed} bytes, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Underlying file I/O failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Cache Error ==
/// Diagnostic produced by a cache operation.
///
/// Returned by the `try_*` operations of [`crate::cache::TtlCache`]; the plain
/// operations log it and degrade to a miss or a no-op.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The storage layer failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Stored text is not a `{value, expiry}` record
    #[error("Malformed cache entry under '{key}': {source}")]
    MalformedEntry {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value codec rejected the payload
    #[error("Codec error: {0}")]
    Codec(String),
}

// == Configuration Error ==
/// Invalid configuration or geometry supplied by a caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Configuration error: {0}")]
pub struct ConfigurationError(pub String);

// == API Error ==
/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No fresh entry for the requested identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConfigurationError> for ApiError {
    fn from(err: ConfigurationError) -> Self {
        ApiError::InvalidRequest(err.0)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
