//! Error types for the fragment cache
//!
//! Store failures surface through `CacheError`; a missing key is never an error
//! at the manager level, only at the HTTP edge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the fragment cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Composed key rejected by the store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Store is full and could not make room
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Malformed admin request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Fragment not cached (HTTP surface only)
    #[error("Fragment not found: {0}")]
    NotFound(String),

    /// Store internals failed (e.g. poisoned lock)
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey(_) | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::CacheFull(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the fragment cache.
pub type Result<T> = std::result::Result<T, CacheError>;
