//! Domain and transfer models for the product API
//!
//! `product` holds the entity itself; `requests` and `responses` define
//! the HTTP bodies around it.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{NewProduct, Product, ProductPatch, ProductStatus};
pub use requests::ProductRequest;
pub use responses::{HealthResponse, MessageResponse, StatsResponse};
