//! Cache Statistics Module
//!
//! Counters kept by a store, plus the manager-level view that adds
//! whether prefix eviction is usable.

use serde::Serialize;

// == Cache Stats ==
/// Store-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a fragment
    pub hits: u64,
    /// Reads that found nothing or found a stale fragment
    pub misses: u64,
    /// Stale fragments dropped by a validity check
    pub expirations: u64,
    /// Fragments dropped to stay within capacity
    pub evictions: u64,
    /// Current number of stored fragments
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a stale read: a miss that also dropped the entry.
    pub fn record_expiration(&mut self) {
        self.misses += 1;
        self.expirations += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Manager Stats ==
/// Snapshot reported by the cache manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerStats {
    #[serde(flatten)]
    pub store: CacheStats,
    pub hit_rate: f64,
    /// False when the store exposes no key view and prefix eviction is a no-op
    pub prefix_eviction_available: bool,
}

impl ManagerStats {
    pub fn new(store: CacheStats, prefix_eviction_available: bool) -> Self {
        Self {
            hit_rate: store.hit_rate(),
            store,
            prefix_eviction_available,
        }
    }
}
