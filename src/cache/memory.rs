//! In-process cache backed by a concurrent map.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::{CachedValue, UserCache};
use crate::observability::metrics;

/// Longest lifetime an entry can get; larger TTLs are clamped to it so the
/// expiry instant never overflows.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    value: CachedValue,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A thread-safe TTL cache.
///
/// Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, Entry>>,
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an entry regardless of its expiry.
    pub fn remove(&self, key: &str) -> Option<CachedValue> {
        let removed = self.inner.remove(key).map(|(_, e)| e.value);
        metrics::record_cache_size(self.inner.len());
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.clear();
        metrics::record_cache_size(0);
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Evict every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.inner.len();
        self.inner.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.inner.len());
        if removed > 0 {
            tracing::debug!(removed, "Purged expired cache entries");
        }
        metrics::record_cache_size(self.inner.len());
        removed
    }
}

impl UserCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedValue> {
        let now = Instant::now();
        let live = match self.inner.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => None,
            None => {
                metrics::record_cache_lookup(key, false);
                return None;
            }
        };

        // The read guard is released above; removing while holding it would
        // deadlock the shard.
        if live.is_none() {
            if self
                .inner
                .remove_if(key, |_, entry| entry.is_expired(now))
                .is_some()
            {
                tracing::trace!(key, "Evicted expired cache entry");
            }
        }

        metrics::record_cache_lookup(key, live.is_some());
        live
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) {
        let expires_at = Instant::now() + ttl.min(MAX_TTL);
        self.inner.insert(key.to_string(), Entry { value, expires_at });
        metrics::record_cache_size(self.inner.len());
    }
}
