//! API Routes
//!
//! Configures the Axum router with all product endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_product, delete_product, health_handler, list_products, show_product,
    stats_handler, update_product, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/products` - List products (cached)
/// - `POST /api/products` - Create a product
/// - `GET /api/products/:id` - Show a product
/// - `PUT|PATCH /api/products/:id` - Update a product
/// - `DELETE /api/products/:id` - Delete a product
/// - `GET /stats` - Listing cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(show_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
