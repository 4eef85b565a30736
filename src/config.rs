//! Configuration Module
//!
//! Loads store sizing and the admin server port from environment variables.

use std::env;

/// Fragment cache configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of fragments the standard store holds before LRU eviction
    pub max_entries: usize,
    /// Number of slots the standard store reserves up front
    pub initial_capacity: usize,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FRAGMENT_CACHE_MAX_ENTRIES` - Maximum cached fragments (default: 100)
    /// - `FRAGMENT_CACHE_INITIAL_CAPACITY` - Pre-allocated slots (default: 10)
    /// - `SERVER_PORT` - Admin HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("FRAGMENT_CACHE_MAX_ENTRIES", defaults.max_entries),
            initial_capacity: env_or("FRAGMENT_CACHE_INITIAL_CAPACITY", defaults.initial_capacity),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            initial_capacity: 10,
            server_port: 3000,
        }
    }
}
