//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::KEY_SEPARATOR;

/// Request body for `PUT /fragments/:name/:mode/:locale`
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// Parsed nodes of the fragment
    pub nodes: Vec<String>,
}

/// Query string for `GET /fragments/:name/:mode/:locale`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Maximum age in seconds; absent or 0 means no expiration
    #[serde(default)]
    pub ttl: Option<i64>,
}

/// Query string for `DELETE /fragments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvictQuery {
    /// Raw key prefix
    #[serde(default)]
    pub prefix: Option<String>,
    /// Whole cache name
    #[serde(default)]
    pub name: Option<String>,
}

impl EvictQuery {
    /// Returns an error message unless exactly one of `prefix` and `name` is set.
    pub fn validate(&self) -> Option<String> {
        match (&self.prefix, &self.name) {
            (Some(_), Some(_)) => Some("Specify either prefix or name, not both".to_string()),
            (None, None) => Some("Either prefix or name is required".to_string()),
            (Some(prefix), None) if prefix.is_empty() => {
                Some("Prefix cannot be empty".to_string())
            }
            (None, Some(name)) => validate_segment("name", name),
            _ => None,
        }
    }
}

/// Validates one segment of a fragment identity.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_segment(label: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{} cannot be empty", label));
    }
    if value.contains(KEY_SEPARATOR) {
        return Some(format!("{} contains a reserved control character", label));
    }
    None
}
