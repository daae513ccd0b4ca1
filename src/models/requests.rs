//! Request DTOs for the product API
//!
//! Turns raw JSON bodies into validated [`NewProduct`] / [`ProductPatch`]
//! values. Only the nine `product_*` fields are read; anything else in the
//! body is ignored.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::models::product::{NewProduct, ProductPatch, ProductStatus, MAX_TEXT_LENGTH};

pub const FIELD_NAME: &str = "product_name";
pub const FIELD_DESCRIPTION: &str = "product_description";
pub const FIELD_PRICE: &str = "product_price";
pub const FIELD_DISCOUNT_PRICE: &str = "product_discount_price";
pub const FIELD_QUANTITY: &str = "product_quantity";
pub const FIELD_IMAGES: &str = "product_images";
pub const FIELD_MANUFACTURER: &str = "product_manufacturer";
pub const FIELD_STATUS: &str = "product_status";
pub const FIELD_SLUG: &str = "product_slug";

/// Request body for creating or updating a product.
///
/// Wraps the JSON object as received. A body that is not an object is
/// treated as empty, so every required field is reported missing.
#[derive(Debug, Clone, Default)]
pub struct ProductRequest {
    fields: Map<String, Value>,
}

impl From<Value> for ProductRequest {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl ProductRequest {
    /// Validates a full product for creation. Every field except the
    /// discount price is required.
    pub fn validate_create(&self) -> Result<NewProduct, ValidationErrors> {
        let mut reader = FieldReader::new(&self.fields, Presence::Required);

        let name = reader.string(FIELD_NAME, Some(MAX_TEXT_LENGTH));
        let description = reader.string(FIELD_DESCRIPTION, None);
        let price = reader.price(FIELD_PRICE);
        let discount_price = reader.nullable_decimal(FIELD_DISCOUNT_PRICE);
        let quantity = reader.quantity(FIELD_QUANTITY);
        let images = reader.string(FIELD_IMAGES, None);
        let manufacturer = reader.string(FIELD_MANUFACTURER, Some(MAX_TEXT_LENGTH));
        let status = reader.status(FIELD_STATUS);
        let slug = reader.string(FIELD_SLUG, Some(MAX_TEXT_LENGTH));

        let errors = reader.finish();
        match (
            name,
            description,
            price,
            quantity,
            images,
            manufacturer,
            status,
            slug,
        ) {
            (
                Some(name),
                Some(description),
                Some(price),
                Some(quantity),
                Some(images),
                Some(manufacturer),
                Some(status),
                Some(slug),
            ) if errors.is_empty() => Ok(NewProduct {
                name,
                description,
                price,
                discount_price: discount_price.flatten(),
                quantity,
                images,
                manufacturer,
                status,
                slug,
            }),
            _ => Err(errors),
        }
    }

    /// Validates a partial update. Absent fields are skipped; present fields
    /// obey the same rules as on creation.
    pub fn validate_update(&self) -> Result<ProductPatch, ValidationErrors> {
        let mut reader = FieldReader::new(&self.fields, Presence::Sometimes);

        let patch = ProductPatch {
            name: reader.string(FIELD_NAME, Some(MAX_TEXT_LENGTH)),
            description: reader.string(FIELD_DESCRIPTION, None),
            price: reader.price(FIELD_PRICE),
            discount_price: reader.nullable_decimal(FIELD_DISCOUNT_PRICE),
            quantity: reader.quantity(FIELD_QUANTITY),
            images: reader.string(FIELD_IMAGES, None),
            manufacturer: reader.string(FIELD_MANUFACTURER, Some(MAX_TEXT_LENGTH)),
            status: reader.status(FIELD_STATUS),
            slug: reader.string(FIELD_SLUG, Some(MAX_TEXT_LENGTH)),
        };

        let errors = reader.finish();
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

// == Field Reader ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Field must be present and non-empty.
    Required,
    /// Field may be omitted, but if present must be non-empty.
    Sometimes,
}

/// Reads one field at a time, accumulating failures.
struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    presence: Presence,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Map<String, Value>, presence: Presence) -> Self {
        Self {
            body,
            presence,
            errors: ValidationErrors::new(),
        }
    }

    fn finish(self) -> ValidationErrors {
        self.errors
    }

    /// Looks up a field, trimming strings and mapping blank strings to null.
    ///
    /// Outer `None` means the key is absent.
    fn lookup(&self, field: &str) -> Option<Option<&'a Value>> {
        let value = self.body.get(field)?;
        match value {
            Value::Null => Some(None),
            Value::String(s) if s.trim().is_empty() => Some(None),
            other => Some(Some(other)),
        }
    }

    /// Resolves presence rules. Returns the non-null value to check, if any.
    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.lookup(field) {
            None if self.presence == Presence::Sometimes => None,
            Some(Some(value)) => Some(value),
            _ => {
                self.errors
                    .add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    fn string(&mut self, field: &str, max_chars: Option<usize>) -> Option<String> {
        let value = self.required(field)?;
        let Some(text) = value.as_str() else {
            self.errors
                .add(field, format!("The {} field must be a string.", label(field)));
            return None;
        };

        let text = text.trim();
        if let Some(max) = max_chars {
            if text.chars().count() > max {
                self.errors.add(
                    field,
                    format!(
                        "The {} field must not be greater than {} characters.",
                        label(field),
                        max
                    ),
                );
                return None;
            }
        }
        Some(text.to_string())
    }

    /// A string holding a decimal amount. The submitted text is kept as-is.
    fn price(&mut self, field: &str) -> Option<String> {
        let text = self.string(field, None)?;
        if Decimal::from_str(&text).is_err() {
            self.errors
                .add(field, format!("The {} field must be a number.", label(field)));
            return None;
        }
        Some(text)
    }

    /// Optional number. Outer `None` means absent, `Some(None)` means null.
    fn nullable_decimal(&mut self, field: &str) -> Option<Option<Decimal>> {
        let value = self.lookup(field)?;
        let Some(value) = value else {
            return Some(None);
        };

        match parse_decimal(value) {
            Some(decimal) => Some(Some(decimal)),
            None => {
                self.errors
                    .add(field, format!("The {} field must be a number.", label(field)));
                None
            }
        }
    }

    fn quantity(&mut self, field: &str) -> Option<u64> {
        let value = self.required(field)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_u64()
                .map(i128::from)
                .or_else(|| n.as_i64().map(i128::from)),
            Value::String(s) => s.trim().parse::<i128>().ok(),
            _ => None,
        };

        match parsed {
            Some(n) if n < 0 => {
                self.errors
                    .add(field, format!("The {} field must be at least 0.", label(field)));
                None
            }
            Some(n) => match u64::try_from(n) {
                Ok(quantity) => Some(quantity),
                Err(_) => {
                    self.errors.add(
                        field,
                        format!("The {} field must be an integer.", label(field)),
                    );
                    None
                }
            },
            None => {
                self.errors.add(
                    field,
                    format!("The {} field must be an integer.", label(field)),
                );
                None
            }
        }
    }

    fn status(&mut self, field: &str) -> Option<ProductStatus> {
        let value = self.required(field)?;
        match value.as_str().map(str::trim).and_then(ProductStatus::from_code) {
            Some(status) => Some(status),
            None => {
                self.errors
                    .add(field, format!("The selected {} is invalid.", label(field)));
                None
            }
        }
    }
}

/// Accepts JSON numbers and numeric strings, including exponent notation.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// `product_discount_price` -> `product discount price`
pub fn label(field: &str) -> String {
    field.replace('_', " ")
}
