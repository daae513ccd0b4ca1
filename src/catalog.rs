//! Catalog
//!
//! Front door to the products: point operations go to the store, the
//! listing goes through the cache, and every successful mutation invalidates
//! the cached listing before it returns. Invalidation does not await, so a
//! committed mutation cannot be dropped before the listing is cleared.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::{CacheStats, ProductList, ProductListCache};
use crate::error::Result;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::store::ProductStore;

pub struct Catalog {
    store: Arc<dyn ProductStore>,
    cache: Arc<ProductListCache>,
}

impl Catalog {
    /// Builds a catalog whose listing cache lives for `ttl`.
    pub fn new(store: Arc<dyn ProductStore>, ttl: Duration) -> Self {
        let cache = Arc::new(ProductListCache::new(store.clone(), ttl));
        Self { store, cache }
    }

    /// The listing cache, e.g. for the background sweeper.
    pub fn cache(&self) -> Arc<ProductListCache> {
        self.cache.clone()
    }

    pub async fn list(&self) -> Result<ProductList> {
        self.cache.get().await
    }

    pub async fn get(&self, id: u64) -> Result<Product> {
        self.store.get(id).await
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        let created = self.store.create(product).await?;
        self.cache.invalidate();
        info!(id = created.id, slug = %created.slug, "product created");
        Ok(created)
    }

    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product> {
        let updated = self.store.update(id, patch).await?;
        self.cache.invalidate();
        info!(id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.store.delete(id).await?;
        self.cache.invalidate();
        info!(id, "product deleted");
        Ok(())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
