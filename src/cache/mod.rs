//! Cache Module
//!
//! Read-through caching of the product listing with TTL expiry and explicit
//! invalidation.

mod entry;
mod list_cache;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use list_cache::{ProductList, ProductListCache};
pub use stats::{CacheCounters, CacheStats};

// == Public Constants ==
/// Well-known key of the cached product listing
pub const LIST_CACHE_KEY: &str = "products";
