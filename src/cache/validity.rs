//! Validity Checker Module
//!
//! Freshness policies consulted by a store when a fragment is read.

use std::time::Duration;

// == Ttl ==
/// How long a cached fragment stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Never stale; only eviction removes the entry
    #[default]
    Never,
    /// Stale once the entry is this many milliseconds old.
    ///
    /// Unlike a raw `0` passed through [`Ttl::from_secs`], `After(0)` is a
    /// real TTL: every entry is already stale, as with a negative value.
    After(i64),
}

impl Ttl {
    /// Builds a TTL from raw seconds, where `0` means no expiration.
    pub fn from_secs(secs: i64) -> Self {
        if secs == 0 {
            Ttl::Never
        } else {
            Ttl::After(secs.saturating_mul(1000))
        }
    }

    /// Builds a TTL from raw milliseconds, where `0` means no expiration.
    pub fn from_millis(millis: i64) -> Self {
        if millis == 0 {
            Ttl::Never
        } else {
            Ttl::After(millis)
        }
    }

    /// Checker for this TTL, or `None` when freshness should not be consulted.
    pub fn checker(self) -> Option<TtlValidityChecker> {
        match self {
            Ttl::Never => None,
            Ttl::After(millis) => Some(TtlValidityChecker::new(millis)),
        }
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Ttl::from_secs(secs)
    }
}

impl From<i32> for Ttl {
    fn from(secs: i32) -> Self {
        Ttl::from_secs(i64::from(secs))
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Ttl::from_secs(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}

impl From<Duration> for Ttl {
    /// `Duration::ZERO` means no expiration; anything else is rounded up to
    /// the next whole millisecond.
    fn from(ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Ttl::Never;
        }
        let millis = ttl.as_nanos().div_ceil(1_000_000);
        Ttl::After(i64::try_from(millis).unwrap_or(i64::MAX))
    }
}

// == Validity Checker ==
/// Decides whether a stored entry may still be served.
pub trait ValidityChecker: Send + Sync {
    /// Returns true if the entry stored under `key` at `inserted_at`
    /// (Unix milliseconds) is still usable at `now`.
    fn is_still_valid(&self, key: &str, inserted_at: u64, now: u64) -> bool;
}

// == TTL Validity Checker ==
/// Valid iff `now - inserted_at < ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlValidityChecker {
    ttl_ms: i64,
}

impl TtlValidityChecker {
    /// Checker for a TTL in milliseconds.
    pub fn new(ttl_ms: i64) -> Self {
        Self { ttl_ms }
    }

    pub fn from_secs(ttl_secs: i64) -> Self {
        Self::new(ttl_secs.saturating_mul(1000))
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }
}

impl ValidityChecker for TtlValidityChecker {
    fn is_still_valid(&self, _key: &str, inserted_at: u64, now: u64) -> bool {
        // i128 keeps clock skew and u64 timestamps from overflowing
        let age_ms = i128::from(now) - i128::from(inserted_at);
        age_ms < i128::from(self.ttl_ms)
    }
}
