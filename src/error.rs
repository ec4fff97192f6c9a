//! Error types for the cache adapter
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the adapter, its backing stores and the HTTP facade.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Missing or invalid adapter configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied an empty key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// An adapter is already bound to this store handle
    #[error("Duplicate instance: {0}")]
    DuplicateInstance(String),

    /// Backing store refused a write for lack of capacity
    #[error("Store full: {0}")]
    StoreFull(String),

    /// Backing store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Key not found (HTTP facade only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data (HTTP facade only)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// HTTP status code used when this error reaches the facade.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::InvalidKey(_) | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::DuplicateInstance(_) => StatusCode::CONFLICT,
            CacheError::StoreFull(_) => StatusCode::INSUFFICIENT_STORAGE,
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for CacheError {
    fn from(rejection: JsonRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache adapter.
pub type Result<T> = std::result::Result<T, CacheError>;
