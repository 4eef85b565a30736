//! Cache Manager Module
//!
//! Facade over a fragment store: composes keys, builds the store on first use
//! and offers exact and prefix eviction.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::cache::{
    CacheKey, FragmentStore, KeyEnumerable, ManagerStats, StandardStore, Ttl, ValidityChecker,
};
use crate::config::Config;
use crate::error::Result;
use crate::models::Fragment;

type StoreFactory<V> = Box<dyn Fn() -> Arc<dyn FragmentStore<V>> + Send + Sync>;

/// Store plus the key view captured when it was built.
struct Backend<V> {
    store: Arc<dyn FragmentStore<V>>,
    key_view: Option<Arc<dyn KeyEnumerable>>,
}

static GLOBAL: OnceLock<Arc<CacheManager<Fragment>>> = OnceLock::new();

// == Cache Manager ==
/// Lazily initialized fragment cache.
///
/// The store is constructed exactly once, on the first call to any
/// operation, even under concurrent first access. Afterwards every call goes
/// straight to the store without locking at this level.
pub struct CacheManager<V> {
    factory: StoreFactory<V>,
    backend: OnceLock<Backend<V>>,
}

impl<V> CacheManager<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a manager that builds its store with `factory` on first use.
    pub fn new<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: FragmentStore<V> + 'static,
    {
        Self {
            factory: Box::new(move || {
                let store: Arc<dyn FragmentStore<V>> = Arc::new(factory());
                store
            }),
            backend: OnceLock::new(),
        }
    }

    /// Creates a manager backed by a `StandardStore` sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        let initial_capacity = config.initial_capacity;
        let max_entries = config.max_entries;
        Self::new(move || StandardStore::new(initial_capacity, max_entries))
    }

    fn backend(&self) -> &Backend<V> {
        self.backend.get_or_init(|| self.initialize())
    }

    fn initialize(&self) -> Backend<V> {
        let store = (self.factory)();
        let key_view = store.key_view();
        if key_view.is_none() {
            warn!("fragment store exposes no key view; evict_by_starts_with will not work");
        }
        info!(
            prefix_eviction = key_view.is_some(),
            "fragment cache initialized"
        );
        Backend { store, key_view }
    }

    /// True once the store has been constructed. Does not trigger construction.
    pub fn is_initialized(&self) -> bool {
        self.backend.get().is_some()
    }

    // == Get ==
    /// Looks up a fragment.
    ///
    /// With `Ttl::Never` (or a raw `0`) the entry's age is ignored; otherwise
    /// an entry at least `ttl` old is treated as absent.
    pub fn get(
        &self,
        name: &str,
        mode: &str,
        locale: &str,
        ttl: impl Into<Ttl>,
    ) -> Result<Option<V>> {
        let ttl: Ttl = ttl.into();
        let key = CacheKey::compose(name, mode, locale);
        let store = &self.backend().store;
        match ttl.checker() {
            None => store.get(key.as_str()),
            Some(checker) => {
                let checker: &dyn ValidityChecker = &checker;
                store.get_checked(key.as_str(), checker)
            }
        }
    }

    // == Put ==
    /// Stores a fragment, replacing any previous one for the same triple.
    pub fn put(&self, name: &str, mode: &str, locale: &str, artifact: V) -> Result<()> {
        let key = CacheKey::compose(name, mode, locale);
        self.backend().store.put(key.as_str(), artifact)
    }

    // == Evict ==
    /// Removes the fragment for exactly this triple. Absent keys are a no-op.
    pub fn evict(&self, name: &str, mode: &str, locale: &str) -> Result<()> {
        let key = CacheKey::compose(name, mode, locale);
        self.backend().store.remove(key.as_str())?;
        Ok(())
    }

    // == Evict By Starts With ==
    /// Removes every fragment whose composed key textually starts with
    /// `prefix`, returning how many were removed.
    ///
    /// Matching is raw: `"nav"` also hits a cache named `"navigation"`. Use
    /// [`CacheManager::evict_by_name`] to match whole names only. Returns 0
    /// without touching anything when the store has no key view.
    pub fn evict_by_starts_with(&self, prefix: &str) -> Result<usize> {
        let backend = self.backend();
        let Some(view) = backend.key_view.as_ref() else {
            debug!(prefix, "prefix eviction unavailable, ignoring");
            return Ok(0);
        };

        let mut removed = 0;
        for key in view.keys()? {
            if key.starts_with(prefix) && backend.store.remove(&key)? {
                removed += 1;
            }
        }

        debug!(prefix, removed, "evicted fragments by prefix");
        Ok(removed)
    }

    // == Evict By Name ==
    /// Removes every fragment cached under exactly `name`, across all modes
    /// and locales.
    pub fn evict_by_name(&self, name: &str) -> Result<usize> {
        self.evict_by_starts_with(&CacheKey::name_prefix(name))
    }

    /// Whether the store exposed a key view at initialization.
    pub fn prefix_eviction_available(&self) -> bool {
        self.backend().key_view.is_some()
    }

    // == Stats ==
    pub fn stats(&self) -> Result<ManagerStats> {
        let backend = self.backend();
        let store_stats = backend.store.stats()?;
        Ok(ManagerStats::new(store_stats, backend.key_view.is_some()))
    }
}

impl CacheManager<Fragment> {
    /// Process-wide fragment cache, configured from the environment on first
    /// access.
    pub fn global() -> Arc<Self> {
        GLOBAL
            .get_or_init(|| Arc::new(Self::from_config(&Config::from_env())))
            .clone()
    }
}

impl<V> fmt::Debug for CacheManager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = self.backend.get();
        f.debug_struct("CacheManager")
            .field("initialized", &backend.is_some())
            .field(
                "prefix_eviction",
                &backend.map(|b| b.key_view.is_some()),
            )
            .finish()
    }
}
