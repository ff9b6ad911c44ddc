//! Cache Entry Module
//!
//! A stored value together with the instant it was stored.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single memoized result.
#[derive(Debug, Clone)]
pub struct CacheEntry<R> {
    /// The stored value
    pub data: R,
    /// When the value was stored
    pub stored_at: Instant,
}

impl<R> CacheEntry<R> {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(data: R) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// An entry is stale once the elapsed time is greater than or equal to
    /// the TTL, so a zero TTL never serves a hit.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }

    // == Time To Live ==
    /// Returns how long the entry stays fresh, zero once stale.
    pub fn remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.stored_at.elapsed())
    }
}
