//! API Handlers
//!
//! HTTP request handlers for the product endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{ProductError, Result};
use crate::models::{HealthResponse, MessageResponse, Product, ProductRequest, StatsResponse};
use crate::store::ProductStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Creates a new AppState around a catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState over `store` with the given listing TTL.
    pub fn with_store(store: Arc<dyn ProductStore>, cache_ttl: Duration) -> Self {
        Self::new(Catalog::new(store, cache_ttl))
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config, store: Arc<dyn ProductStore>) -> Self {
        Self::with_store(store, config.cache_ttl())
    }
}

/// Parses a path id. Anything that is not a valid id cannot name a product.
fn parse_id(raw: &str) -> Result<u64> {
    raw.parse().map_err(|_| {
        debug!(raw, "unparseable product id");
        ProductError::NotFound(0)
    })
}

/// Handler for GET /api/products
///
/// Returns every product, or a message when there are none.
pub async fn list_products(State(state): State<AppState>) -> Result<Response> {
    let products = state.catalog.list().await?;

    if products.is_empty() {
        return Ok(Json(MessageResponse::no_products()).into_response());
    }
    Ok(Json(products.as_slice()).into_response())
}

/// Reads a request body as a JSON value. A body that is missing, not JSON,
/// or sent without a JSON content type carries no fields.
fn body_fields(body: Option<Json<Value>>) -> ProductRequest {
    let Some(Json(value)) = body else {
        debug!("request body is not JSON, treating it as empty");
        return ProductRequest::from(Value::Null);
    };
    ProductRequest::from(value)
}

/// Handler for POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = body_fields(body)
        .validate_create()
        .map_err(ProductError::Validation)?;

    let created = state.catalog.create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/products/:id
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.get(id).await?))
}

/// Handler for PUT/PATCH /api/products/:id
///
/// Existence is checked before the body is validated.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    state.catalog.get(id).await?;

    let patch = body_fields(body)
        .validate_update()
        .map_err(ProductError::Validation)?;

    Ok(Json(state.catalog.update(id, patch).await?))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns listing cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.catalog.cache_stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
