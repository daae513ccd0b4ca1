//! Bootstrap data
//!
//! Inserts the fixed starter products through the regular create path.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::{ProductError, Result};
use crate::models::{NewProduct, ProductStatus};

/// The starter products, in insertion order.
pub fn seed_products() -> Result<Vec<NewProduct>> {
    [
        (1, "299.99", "279.99", 80),
        (2, "399.99", "379.99", 90),
    ]
    .into_iter()
    .map(|(n, price, discount, quantity)| -> Result<NewProduct> {
        let discount = Decimal::from_str(discount)
            .map_err(|e| ProductError::Internal(format!("bad seed discount {discount}: {e}")))?;
        Ok(NewProduct {
            name: format!("Product {n}"),
            description: format!("Description for Product {n}"),
            price: price.to_string(),
            discount_price: Some(discount),
            quantity,
            images: format!("product{n}_image1.jpg,product{n}_image2.jpg"),
            manufacturer: format!("Product {n} Manufacturer"),
            status: ProductStatus::Active,
            slug: format!("product-{n}"),
        })
    })
    .collect()
}

/// Creates the starter products. Slugs that already exist are skipped.
///
/// Returns the number of products inserted.
pub async fn seed(catalog: &Catalog) -> Result<usize> {
    let mut inserted = 0;

    for product in seed_products()? {
        let slug = product.slug.clone();
        match catalog.create(product).await {
            Ok(created) => {
                inserted += 1;
                info!(id = created.id, slug = %slug, "seeded product");
            }
            Err(ProductError::Validation(errors)) => {
                warn!(slug = %slug, %errors, "skipping seed product");
            }
            Err(other) => return Err(other),
        }
    }

    Ok(inserted)
}
