//! Product entity
//!
//! The persisted record plus the validated inputs that create and modify it.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of the bounded text fields.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Fractional digits kept on a discount price.
pub const DISCOUNT_SCALE: u32 = 2;

// == Product Status ==
/// Sales status of a product, stored as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "D")]
    Discontinued,
}

impl ProductStatus {
    /// Parses the wire code (`A` or `D`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Active),
            "D" => Some(Self::Discontinued),
            _ => None,
        }
    }
}

// == Product ==
/// A sellable item as held by the store.
///
/// Timestamps are server-managed and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_description")]
    pub description: String,
    #[serde(rename = "product_price")]
    pub price: String,
    #[serde(rename = "product_discount_price")]
    pub discount_price: Option<Decimal>,
    #[serde(rename = "product_quantity")]
    pub quantity: u64,
    /// Comma-separated image filenames, kept opaque.
    #[serde(rename = "product_images")]
    pub images: String,
    #[serde(rename = "product_manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "product_status")]
    pub status: ProductStatus,
    #[serde(rename = "product_slug")]
    pub slug: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrites the fields present in `patch` and refreshes `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        let ProductPatch {
            name,
            description,
            price,
            discount_price,
            quantity,
            images,
            manufacturer,
            status,
            slug,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(discount_price) = discount_price {
            self.discount_price = discount_price.map(normalize_discount);
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(manufacturer) = manufacturer {
            self.manufacturer = manufacturer;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        self.updated_at = now;
    }
}

// == New Product ==
/// Validated fields for a product that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub discount_price: Option<Decimal>,
    pub quantity: u64,
    pub images: String,
    pub manufacturer: String,
    pub status: ProductStatus,
    pub slug: String,
}

impl NewProduct {
    /// Materializes the record with its generated id and timestamps.
    pub fn into_product(self, id: u64, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            discount_price: self.discount_price.map(normalize_discount),
            quantity: self.quantity,
            images: self.images,
            manufacturer: self.manufacturer,
            status: self.status,
            slug: self.slug,
            created_at: now,
            updated_at: now,
        }
    }
}

// == Product Patch ==
/// Partial update. `None` leaves the field untouched.
///
/// `discount_price` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub discount_price: Option<Option<Decimal>>,
    pub quantity: Option<u64>,
    pub images: Option<String>,
    pub manufacturer: Option<String>,
    pub status: Option<ProductStatus>,
    pub slug: Option<String>,
}

/// Rounds half away from zero and pins the scale to two digits.
pub fn normalize_discount(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISCOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISCOUNT_SCALE);
    rounded
}
