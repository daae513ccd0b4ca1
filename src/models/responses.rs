//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! products themselves.

use serde::Serialize;

use crate::cache::CacheStats;

/// Informational body, e.g. for an empty listing.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Body returned by the listing endpoint when no products exist.
    pub fn no_products() -> Self {
        Self::new("No products found")
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Listing reads served from the cache
    pub hits: u64,
    /// Listing reads that had to go to the store
    pub misses: u64,
    /// Completed store reads that refreshed the cache
    pub populations: u64,
    /// Explicit invalidations
    pub invalidations: u64,
    /// Whether a listing is currently cached
    pub cached: bool,
    /// Number of products in the cached listing
    pub cached_products: usize,
    /// Remaining lifetime of the cached listing in seconds
    pub ttl_remaining: Option<u64>,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            populations: stats.populations,
            invalidations: stats.invalidations,
            cached: stats.cached_products.is_some(),
            cached_products: stats.cached_products.unwrap_or(0),
            ttl_remaining: stats.ttl_remaining.map(|ttl| ttl.as_secs()),
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
