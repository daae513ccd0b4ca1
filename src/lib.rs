//! Product Catalog - A REST API over a product table
//!
//! Serves CRUD operations on products, with a TTL-cached listing that every
//! mutation invalidates.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use catalog::Catalog;
pub use config::Config;
pub use store::{MemoryProductStore, ProductStore};
pub use tasks::spawn_cache_sweeper;
