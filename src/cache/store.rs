//! Cache Store Module
//!
//! The seam between the cache manager and whatever actually holds fragments,
//! plus the standard bounded LRU store used by default.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::cache::{
    current_timestamp_ms, CacheEntry, CacheStats, LruTracker, ValidityChecker, MAX_KEY_LENGTH,
};
use crate::error::{CacheError, Result};

/// Source of "now" in Unix milliseconds.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

// == Key Enumerable ==
/// Optional store capability: list every key currently stored.
///
/// Required for prefix eviction. The returned list is a point-in-time view;
/// keys inserted or removed concurrently may or may not appear. A store
/// that cannot produce the list reports why instead of returning nothing.
pub trait KeyEnumerable: Send + Sync {
    fn keys(&self) -> Result<Vec<String>>;
}

// == Fragment Store ==
/// Minimal store contract consumed by the cache manager.
///
/// Implementations must be safe for concurrent use; the manager takes no
/// lock of its own once the store exists.
pub trait FragmentStore<V>: Send + Sync {
    /// Plain lookup, no freshness check.
    fn get(&self, key: &str) -> Result<Option<V>>;

    /// Lookup that treats entries rejected by `checker` as absent.
    fn get_checked(&self, key: &str, checker: &dyn ValidityChecker) -> Result<Option<V>>;

    /// Inserts or overwrites, refreshing the insertion timestamp.
    fn put(&self, key: &str, value: V) -> Result<()>;

    /// Removes `key`, returning whether it was present.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Key-enumerable view of the store's contents, if it has one.
    fn key_view(&self) -> Option<Arc<dyn KeyEnumerable>> {
        None
    }

    fn stats(&self) -> Result<CacheStats>;
}

// == Data Container ==
struct ContainerState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
}

/// Shared mutable heart of a `StandardStore`; doubles as its key view.
struct DataContainer<V> {
    state: Mutex<ContainerState<V>>,
}

impl<V> DataContainer<V> {
    fn lock(&self) -> Result<MutexGuard<'_, ContainerState<V>>> {
        self.state
            .lock()
            .map_err(|_| CacheError::Internal("fragment store lock poisoned".to_string()))
    }
}

impl<V: Send> KeyEnumerable for DataContainer<V> {
    fn keys(&self) -> Result<Vec<String>> {
        let state = self.lock()?;
        Ok(state.entries.keys().cloned().collect())
    }
}

// == Standard Store ==
/// Bounded in-memory store with LRU eviction.
pub struct StandardStore<V> {
    container: Arc<DataContainer<V>>,
    max_entries: usize,
    clock: Clock,
}

impl<V> StandardStore<V> {
    // == Constructor ==
    /// Creates a store that holds at most `max_entries` fragments.
    ///
    /// # Arguments
    /// * `initial_capacity` - Slots reserved up front
    /// * `max_entries` - Capacity before the least recently used entry is dropped
    pub fn new(initial_capacity: usize, max_entries: usize) -> Self {
        let initial_capacity = initial_capacity.min(max_entries);
        Self {
            container: Arc::new(DataContainer {
                state: Mutex::new(ContainerState {
                    entries: HashMap::with_capacity(initial_capacity),
                    lru: LruTracker::with_capacity(initial_capacity),
                    stats: CacheStats::new(),
                }),
            }),
            max_entries,
            clock: Arc::new(current_timestamp_ms),
        }
    }

    /// Replaces the wall clock used to stamp and check entries.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.container
            .lock()
            .map(|state| state.entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> StandardStore<V> {
    fn lookup(&self, key: &str, checker: Option<&dyn ValidityChecker>) -> Result<Option<V>> {
        let now = (self.clock)();
        let mut guard = self.container.lock()?;
        let state = &mut *guard;

        let Some(entry) = state.entries.get(key) else {
            state.stats.record_miss();
            return Ok(None);
        };

        let fresh = checker.map_or(true, |c| c.is_still_valid(key, entry.inserted_at, now));
        if !fresh {
            state.entries.remove(key);
            state.lru.remove(key);
            state.stats.record_expiration();
            state.stats.set_total_entries(state.entries.len());
            debug!(key = %key.escape_debug(), "dropped stale fragment");
            return Ok(None);
        }

        let value = entry.value.clone();
        state.lru.touch(key);
        state.stats.record_hit();
        Ok(Some(value))
    }
}

impl<V> fmt::Debug for StandardStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardStore")
            .field("max_entries", &self.max_entries)
            .field("len", &self.len())
            .finish()
    }
}

impl<V> FragmentStore<V> for StandardStore<V>
where
    V: Clone + Send + 'static,
{
    fn get(&self, key: &str) -> Result<Option<V>> {
        self.lookup(key, None)
    }

    fn get_checked(&self, key: &str, checker: &dyn ValidityChecker) -> Result<Option<V>> {
        self.lookup(key, Some(checker))
    }

    fn put(&self, key: &str, value: V) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let now = (self.clock)();
        let mut guard = self.container.lock()?;
        let state = &mut *guard;

        let is_overwrite = state.entries.contains_key(key);
        if !is_overwrite && state.entries.len() >= self.max_entries {
            match state.lru.evict_oldest() {
                Some(evicted) => {
                    state.entries.remove(&evicted);
                    state.stats.record_eviction();
                    debug!(key = %evicted.escape_debug(), "evicted least recently used fragment");
                }
                None => {
                    return Err(CacheError::CacheFull(format!(
                        "store holds at most {} fragments",
                        self.max_entries
                    )));
                }
            }
        }

        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, now));
        state.lru.touch(key);
        state.stats.set_total_entries(state.entries.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut guard = self.container.lock()?;
        let state = &mut *guard;

        let removed = state.entries.remove(key).is_some();
        if removed {
            state.lru.remove(key);
            state.stats.set_total_entries(state.entries.len());
        }
        Ok(removed)
    }

    fn key_view(&self) -> Option<Arc<dyn KeyEnumerable>> {
        let view: Arc<dyn KeyEnumerable> = self.container.clone();
        Some(view)
    }

    fn stats(&self) -> Result<CacheStats> {
        let state = self.container.lock()?;
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        Ok(stats)
    }
}
