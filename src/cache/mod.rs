//! Cache Module
//!
//! Fragment caching: key composition, TTL validity checks, the store seam
//! with its standard LRU implementation, and the lazily initialized manager.

mod entry;
mod key;
mod lru;
mod manager;
mod stats;
mod store;
mod validity;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{CacheKey, KEY_SEPARATOR};
pub use lru::LruTracker;
pub use manager::CacheManager;
pub use stats::{CacheStats, ManagerStats};
pub use store::{Clock, FragmentStore, KeyEnumerable, StandardStore};
pub use validity::{Ttl, TtlValidityChecker, ValidityChecker};

// == Public Constants ==
/// Maximum composed key length accepted by the standard store, in bytes
pub const MAX_KEY_LENGTH: usize = 1024;
