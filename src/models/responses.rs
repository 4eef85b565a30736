//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheKey;
use crate::models::Fragment;

/// Response body for `GET /fragments/:name/:mode/:locale`
#[derive(Debug, Clone, Serialize)]
pub struct FragmentResponse {
    pub name: String,
    pub mode: String,
    pub locale: String,
    #[serde(flatten)]
    pub fragment: Fragment,
}

impl FragmentResponse {
    pub fn new(name: String, mode: String, locale: String, fragment: Fragment) -> Self {
        Self {
            name,
            mode,
            locale,
            fragment,
        }
    }
}

/// Response body for `PUT /fragments/:name/:mode/:locale`
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
}

impl PutResponse {
    pub fn new(name: &str, mode: &str, locale: &str) -> Self {
        Self {
            message: format!("Fragment '{}' cached", CacheKey::compose(name, mode, locale)),
        }
    }
}

/// Response body for both exact and bulk eviction
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    /// Success message
    pub message: String,
    /// Number of fragments removed; absent for exact eviction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl EvictResponse {
    pub fn exact(name: &str, mode: &str, locale: &str) -> Self {
        Self {
            message: format!("Fragment '{}' evicted", CacheKey::compose(name, mode, locale)),
            removed: None,
        }
    }

    pub fn bulk(pattern: &str, removed: usize) -> Self {
        Self {
            message: format!("Evicted {} fragment(s) matching '{}'", removed, pattern),
            removed: Some(removed),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the fragment store has been built yet
    pub cache_initialized: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_initialized: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            cache_initialized,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
