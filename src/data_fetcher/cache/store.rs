use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

use super::clock::{Clock, SystemClock};
use super::types::{CacheEntry, CacheKey, CacheLookup, CacheStats};

/// Keyed store of the most recent value fetched per query.
///
/// Entries are never evicted: staleness is computed at read time and an
/// expired entry stays available through [`CacheStore::get_allowing_stale`].
/// Every operation takes the lock once and releases it before returning, so
/// readers only ever observe complete writes.
pub struct CacheStore<V> {
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V> std::fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<V: Clone + Send + Sync> CacheStore<V> {
    /// Creates an empty store using the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store that reads time from `clock`
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up `key` and reports whether the stored value is still fresh.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get(&self, key: &CacheKey) -> Option<CacheLookup<V>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;

        let Some(entry) = entries.get(key) else {
            debug!("Cache miss: key={}", key);
            return None;
        };

        let age = entry.age(now);
        let is_fresh = entry.is_fresh(now, self.ttl);
        trace!(
            "Cache lookup: key={}, age={:?}, ttl={:?}, is_fresh={}",
            key, age, self.ttl, is_fresh
        );

        Some(CacheLookup {
            value: entry.value.clone(),
            is_fresh,
            age,
        })
    }

    /// Returns the stored value regardless of its age.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get_allowing_stale(&self, key: &CacheKey) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` as fetched now, replacing any previous entry for `key`.
    #[instrument(skip(self, value), fields(key = %key))]
    pub async fn set(&self, key: CacheKey, value: V) {
        let stored_at = self.clock.now();
        let mut entries = self.entries.write().await;
        let replaced = entries
            .insert(key.clone(), CacheEntry::new(value, stored_at))
            .is_some();
        debug!("Cached value: key={}, replaced={}", key, replaced);
    }

    /// Number of stored entries, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Gets fresh/stale counts for monitoring purposes
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        let fresh = entries
            .values()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .count();

        CacheStats {
            entries: entries.len(),
            fresh,
            stale: entries.len() - fresh,
        }
    }
}
