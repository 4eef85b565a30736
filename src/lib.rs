//! Fragment Cache - template fragment caching with TTL checks and prefix eviction
//!
//! Cached fragments are keyed by (name, rendering mode, locale). The
//! [`CacheManager`] builds its store lazily and exactly once, checks freshness
//! on read when a TTL is given, and evicts by exact key or key prefix.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheManager, FragmentStore, KeyEnumerable, StandardStore, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use models::Fragment;
