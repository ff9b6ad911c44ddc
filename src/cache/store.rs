//! Cache Store Module
//!
//! Shared TTL map handed to the cache enhancement and kept in application state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats};

#[derive(Debug)]
struct Inner<R> {
    entries: HashMap<String, CacheEntry<R>>,
    stats: CacheStats,
}

// == TTL Cache ==
/// Cloneable handle to a string-keyed map of timestamped values.
///
/// Stale entries are only removed when a lookup touches them; nothing sweeps
/// the map in the background. All clones share the same storage.
#[derive(Debug)]
pub struct TtlCache<R> {
    inner: Arc<RwLock<Inner<R>>>,
    ttl: Duration,
}

impl<R> Clone for TtlCache<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            ttl: self.ttl,
        }
    }
}

impl<R: Clone> TtlCache<R> {
    // == Constructor ==
    /// Creates an empty cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            })),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns a clone of the value stored under `key` if it is still fresh.
    ///
    /// A stale entry is removed and counted as both an eviction and a miss.
    pub async fn get(&self, key: &str) -> Option<R> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        match inner.entries.get(key) {
            Some(entry) if !entry.is_stale(self.ttl) => {
                let data = entry.data.clone();
                inner.stats.record_hit();
                Some(data)
            }
            Some(_) => {
                inner.entries.remove(key);
                inner.stats.record_eviction();
                inner.stats.record_miss();
                let len = inner.entries.len();
                inner.stats.set_total_entries(len);
                None
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores `data` under `key` with a fresh timestamp, replacing any entry.
    pub async fn insert(&self, key: impl Into<String>, data: R) {
        let mut inner = self.inner.write().await;
        inner.entries.insert(key.into(), CacheEntry::new(data));
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }

    // == Contains ==
    /// Checks for a fresh entry without touching hit/miss counters.
    pub async fn contains(&self, key: &str) -> bool {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let stale = match inner.entries.get(key) {
            Some(entry) => entry.is_stale(self.ttl),
            None => return false,
        };

        if stale {
            inner.entries.remove(key);
            inner.stats.record_eviction();
            let len = inner.entries.len();
            inner.stats.set_total_entries(len);
        }
        !stale
    }

    // == Clear ==
    /// Drops every entry and returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.stats.set_total_entries(0);
        removed
    }

    /// Number of stored entries, stale ones included until looked up.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats.clone()
    }
}
