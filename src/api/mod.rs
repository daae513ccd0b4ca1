//! API Module
//!
//! HTTP handlers and routing for the product REST API.
//!
//! # Endpoints
//! - `GET /api/products` - List products
//! - `POST /api/products` - Create a product
//! - `GET /api/products/:id` - Show a product
//! - `PUT|PATCH /api/products/:id` - Update a product
//! - `DELETE /api/products/:id` - Delete a product
//! - `GET /stats` - Listing cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
