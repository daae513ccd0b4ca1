//! Cache Statistics Module
//!
//! Tracks how the product listing cache is being used.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the listing cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cached listing
    pub hits: u64,
    /// Reads that went to the store
    pub misses: u64,
    /// Store reads whose result was cached
    pub populations: u64,
    /// Explicit invalidations
    pub invalidations: u64,
    /// Size of the cached listing, if one is live
    pub cached_products: Option<usize>,
    /// Remaining lifetime of the cached listing, if one is live
    pub ttl_remaining: Option<Duration>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Counters ==
/// Lock-free counters shared by every caller of the cache.
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    populations: AtomicU64,
    invalidations: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_population(&self) {
        self.populations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the counters into a `CacheStats` with no live listing.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            populations: self.populations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            cached_products: None,
            ttl_remaining: None,
        }
    }
}
