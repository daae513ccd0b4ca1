//! Error types for the product catalog
//!
//! Provides unified error handling using thiserror.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// == Validation Errors ==
/// Field-level validation failures, keyed by wire field name.
///
/// Serializes as `{"product_slug": ["The product slug has already been taken."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding a single failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records a failure for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns true if no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if `field` has at least one failure.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the messages recorded for `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

// == Product Error Enum ==
/// Unified error type for the product catalog.
#[derive(Error, Debug)]
pub enum ProductError {
    /// No product with this id
    #[error("Product not found: {0}")]
    NotFound(u64),

    /// One or more field constraints were violated
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The backing store could not serve the request
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProductError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product not found" }),
            ),
            ProductError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": errors }))
            }
            ProductError::StoreUnavailable(msg) => {
                tracing::error!("store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Service unavailable" }),
                )
            }
            ProductError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product catalog.
pub type Result<T> = std::result::Result<T, ProductError>;
