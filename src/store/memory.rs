//! In-Memory Product Store
//!
//! Product table held in process memory, ordered by id, with a unique slug
//! index. All writes take the table's write lock, which serializes them.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ProductError, Result};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::store::{slug_taken, ProductStore};

// == Table ==
#[derive(Debug)]
struct Table {
    /// Rows keyed by id
    rows: BTreeMap<u64, Product>,
    /// Slug -> id
    slugs: HashMap<String, u64>,
    /// Id handed to the next insert
    next_id: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            slugs: HashMap::new(),
            next_id: 1,
        }
    }
}

// == Memory Product Store ==
/// Product store backed by an in-process table.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: RwLock<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number of products.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Returns true if the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> Result<Product> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(ProductError::NotFound(id))
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let mut table = self.table.write().await;

        if table.slugs.contains_key(&product.slug) {
            return Err(slug_taken());
        }

        let id = table.next_id;
        table.next_id += 1;

        let product = product.into_product(id, Utc::now());
        table.slugs.insert(product.slug.clone(), id);
        table.rows.insert(id, product.clone());

        debug!(id, slug = %product.slug, "product inserted");
        Ok(product)
    }

    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product> {
        let mut table = self.table.write().await;

        let current_slug = match table.rows.get(&id) {
            Some(existing) => existing.slug.clone(),
            None => return Err(ProductError::NotFound(id)),
        };

        let new_slug = patch.slug.clone().filter(|slug| *slug != current_slug);
        if let Some(slug) = &new_slug {
            if table.slugs.contains_key(slug) {
                return Err(slug_taken());
            }
        }

        let Some(product) = table.rows.get_mut(&id) else {
            return Err(ProductError::NotFound(id));
        };
        product.apply(patch, Utc::now());
        let updated = product.clone();

        if let Some(slug) = new_slug {
            table.slugs.remove(&current_slug);
            table.slugs.insert(slug, id);
        }

        debug!(id, "product updated");
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut table = self.table.write().await;

        match table.rows.remove(&id) {
            Some(product) => {
                table.slugs.remove(&product.slug);
                debug!(id, "product deleted");
                Ok(())
            }
            None => Err(ProductError::NotFound(id)),
        }
    }
}
