//! Instrumented store for exercising callers of `ProductStore`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{ProductError, Result};
use crate::models::{NewProduct, Product, ProductPatch, ProductStatus};
use crate::store::{MemoryProductStore, ProductStore};

/// Wraps a `MemoryProductStore`, counting `list` calls.
///
/// `list` can be made to fail, or to pause after taking its snapshot until
/// the test releases it.
#[derive(Debug, Default)]
pub struct InstrumentedStore {
    pub inner: MemoryProductStore,
    lists: AtomicUsize,
    failing: AtomicBool,
    gated: AtomicBool,
    /// Signalled when a gated `list` has taken its snapshot
    pub entered: Notify,
    /// Lets one gated `list` return
    pub release: Notify,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_gated(&self, gated: bool) {
        self.gated.store(gated, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for InstrumentedStore {
    async fn list(&self) -> Result<Vec<Product>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProductError::StoreUnavailable("list failed".to_string()));
        }

        let snapshot = self.inner.list().await?;
        if self.gated.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(snapshot)
    }

    async fn get(&self, id: u64) -> Result<Product> {
        self.inner.get(id).await
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        self.inner.create(product).await
    }

    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.inner.delete(id).await
    }
}

/// A valid product with the given slug.
pub fn sample_product(slug: &str) -> NewProduct {
    NewProduct {
        name: format!("Product {slug}"),
        description: format!("Description for {slug}"),
        price: "299.99".to_string(),
        discount_price: None,
        quantity: 80,
        images: format!("{slug}_1.jpg,{slug}_2.jpg"),
        manufacturer: "Acme".to_string(),
        status: ProductStatus::Active,
        slug: slug.to_string(),
    }
}
