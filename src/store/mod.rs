//! Product Store Module
//!
//! Durable CRUD access to product records. The store is the only component
//! that can authoritatively enforce slug uniqueness.

mod memory;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::{ProductError, Result, ValidationErrors};
use crate::models::requests::{label, FIELD_SLUG};
use crate::models::{NewProduct, Product, ProductPatch};

pub use memory::MemoryProductStore;

/// Storage backend for products.
///
/// Each call is an independent, atomic operation. Implementations must
/// serialize conflicting writes so that of two concurrent creates with the
/// same slug exactly one succeeds.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Returns every product, or an empty vec if there are none.
    async fn list(&self) -> Result<Vec<Product>>;

    async fn get(&self, id: u64) -> Result<Product>;

    /// Inserts a product, assigning its id and timestamps.
    ///
    /// Fails with a validation error on `product_slug` if the slug is taken.
    async fn create(&self, product: NewProduct) -> Result<Product>;

    /// Applies a partial update.
    ///
    /// A missing id is reported before any slug conflict. A product keeping
    /// its own slug does not conflict with itself.
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product>;

    /// Removes a product permanently.
    async fn delete(&self, id: u64) -> Result<()>;
}

/// Error returned when a slug already belongs to another product.
pub fn slug_taken() -> ProductError {
    ProductError::Validation(ValidationErrors::single(
        FIELD_SLUG,
        format!("The {} has already been taken.", label(FIELD_SLUG)),
    ))
}
