//! In-memory cache with per-entry time-to-live.
//!
//! Keys are opaque fingerprint strings computed by the caller; the cache
//! imposes no canonicalization and does no hashing of its own. Eviction is
//! lazy: a stale entry is dropped when `get` touches it, or in bulk via
//! [`TtlCache::purge_expired`]. There is no size bound, so an instance fed
//! unbounded distinct keys grows without limit.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    clock::{Clock, SystemClock},
    error::ConfigError,
};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<V, C: Clock = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: HashMap<String, Entry<V>>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Result<Self, ConfigError> {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Result<Self, ConfigError> {
        if ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(Self {
            ttl,
            clock,
            entries: HashMap::new(),
        })
    }

    /// Stores `value` under `key`, stamped with the current time. An existing
    /// entry for the key is overwritten unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        tracing::debug!(%key, "cache set");
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: self.clock.now(),
            },
        );
    }

    /// Returns the stored value if the entry is younger than the ttl.
    /// A stale entry is evicted on the way out. Absence is a normal
    /// outcome, not an error.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let entry = self.entries.get(key)?;
        if self.clock.now().duration_since(entry.inserted_at) >= self.ttl {
            self.entries.remove(key);
            tracing::debug!(%key, "cache entry expired");
            return None;
        }
        tracing::debug!(%key, "cache hit");
        Some(entry.value.clone())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::info!("cache cleared");
    }

    /// Current entry count. Because eviction is lazy, this may include
    /// stale entries that no `get` has touched yet; call
    /// [`purge_expired`](Self::purge_expired) first for an exact live count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
        before - self.entries.len()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock(ttl_secs: u64) -> (TtlCache<i32, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), clock.clone()).unwrap();
        (cache, clock)
    }

    #[test]
    fn set_then_get_returns_value() {
        let (mut cache, _clock) = cache_with_clock(2);
        cache.set("a", 1);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn get_after_ttl_returns_none_and_evicts() {
        let (mut cache, clock) = cache_with_clock(2);
        cache.set("a", 1);
        assert_eq!(cache.get("a"), Some(1));

        clock.advance(Duration::from_secs(3));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0, "stale entry should be evicted by get");
    }

    #[test]
    fn age_equal_to_ttl_is_stale() {
        let (mut cache, clock) = cache_with_clock(2);
        cache.set("a", 1);
        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn overwrite_restamps_the_entry() {
        let (mut cache, clock) = cache_with_clock(2);
        cache.set("a", 1);
        clock.advance(Duration::from_millis(1500));
        cache.set("a", 2);
        clock.advance(Duration::from_millis(1000));
        // 2.5s after the first insert, 1s after the second.
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn clear_removes_everything() {
        let (mut cache, _clock) = cache_with_clock(60);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn len_counts_stale_entries_until_purged() {
        let (mut cache, clock) = cache_with_clock(1);
        cache.set("a", 1);
        cache.set("b", 2);
        clock.advance(Duration::from_secs(5));

        assert_eq!(cache.len(), 2, "lazy eviction leaves stale entries in len");
        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn purge_keeps_live_entries() {
        let (mut cache, clock) = cache_with_clock(10);
        cache.set("old", 1);
        clock.advance(Duration::from_secs(9));
        cache.set("new", 2);
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get("new"), Some(2));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let result = TtlCache::<i32>::new(Duration::ZERO);
        assert_eq!(result.err(), Some(ConfigError::ZeroTtl));
    }
}
