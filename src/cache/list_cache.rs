//! Product List Cache
//!
//! Single-entry read-through cache in front of `ProductStore::list`.
//!
//! Populations are single-flight: callers that miss queue on one async mutex
//! and only the first of them reads the store. Every invalidation bumps a
//! generation counter, and a population only publishes its result if the
//! generation it started under is still current.
//!
//! The slot sits behind a synchronous lock that is never held across an
//! await, so `invalidate` has no suspension point and cannot be cancelled
//! halfway.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheCounters, CacheEntry, CacheStats, LIST_CACHE_KEY};
use crate::error::Result;
use crate::models::Product;
use crate::store::ProductStore;

/// Shared, immutable product listing.
pub type ProductList = Arc<Vec<Product>>;

#[derive(Debug, Default)]
struct Slot {
    entry: Option<CacheEntry<ProductList>>,
    generation: u64,
}

// == Product List Cache ==
pub struct ProductListCache {
    store: Arc<dyn ProductStore>,
    ttl: Duration,
    slot: RwLock<Slot>,
    /// Held for the whole of a population
    populate: Mutex<()>,
    counters: CacheCounters,
}

impl ProductListCache {
    // == Constructor ==
    /// Creates an empty cache over `store` whose listings live for `ttl`.
    pub fn new(store: Arc<dyn ProductStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            slot: RwLock::new(Slot::default()),
            populate: Mutex::new(()),
            counters: CacheCounters::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the cached listing, reading the store on a miss.
    ///
    /// A store failure is returned as-is and leaves the cache empty.
    pub async fn get(&self) -> Result<ProductList> {
        if let Some(products) = self.lookup() {
            self.counters.record_hit();
            return Ok(products);
        }

        let _populating = self.populate.lock().await;

        // Filled by whoever held the lock before us.
        if let Some(products) = self.lookup() {
            self.counters.record_hit();
            return Ok(products);
        }

        self.counters.record_miss();
        let generation = self.read_slot().generation;
        debug!(key = LIST_CACHE_KEY, generation, "listing cache miss, reading store");

        let products: ProductList = Arc::new(self.store.list().await?);

        let mut slot = self.write_slot();
        if slot.generation == generation {
            slot.entry = Some(CacheEntry::new(products.clone(), self.ttl));
            self.counters.record_population();
            debug!(
                key = LIST_CACHE_KEY,
                count = products.len(),
                "listing cache populated"
            );
        } else {
            debug!(
                key = LIST_CACHE_KEY,
                "listing invalidated during population, result not cached"
            );
        }

        Ok(products)
    }

    // == Invalidate ==
    /// Drops the cached listing, whatever its remaining lifetime.
    ///
    /// Any population already in flight will not publish its result.
    pub fn invalidate(&self) {
        let mut slot = self.write_slot();
        slot.entry = None;
        slot.generation += 1;
        self.counters.record_invalidation();
        debug!(key = LIST_CACHE_KEY, generation = slot.generation, "listing cache invalidated");
    }

    // == Purge Expired ==
    /// Drops the listing if it has expired. Returns true if one was dropped.
    pub fn purge_expired(&self) -> bool {
        let mut slot = self.write_slot();
        let expired_age = slot
            .entry
            .as_ref()
            .filter(|entry| entry.is_expired())
            .map(CacheEntry::age);

        match expired_age {
            Some(age) => {
                slot.entry = None;
                info!(key = LIST_CACHE_KEY, age_secs = age.as_secs(), "expired listing purged");
                true
            }
            None => false,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.counters.snapshot();
        let slot = self.read_slot();
        if let Some(entry) = slot.entry.as_ref().filter(|entry| !entry.is_expired()) {
            stats.cached_products = Some(entry.value.len());
            stats.ttl_remaining = Some(entry.ttl_remaining());
        }
        stats
    }

    /// Returns true if a live listing is cached.
    pub fn is_populated(&self) -> bool {
        self.lookup().is_some()
    }

    fn lookup(&self) -> Option<ProductList> {
        self.read_slot()
            .entry
            .as_ref()
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // A panic while the slot is held leaves it in a consistent state, so
    // poisoning is ignored.
    fn read_slot(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ProductListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductListCache")
            .field("ttl", &self.ttl)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}
