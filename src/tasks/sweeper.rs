//! Listing Cache Sweeper
//!
//! Background task that periodically drops an expired product listing.
//! Expiry is already enforced on read; the sweep only releases the memory
//! of a listing nobody asks for.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ProductListCache;

/// Spawns a background task that purges an expired listing every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_cache_sweeper(catalog.cache(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cache_sweeper(cache: Arc<ProductListCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting listing cache sweeper with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            if cache.purge_expired() {
                info!("Cache sweep: expired product listing dropped");
            } else {
                debug!("Cache sweep: nothing to drop");
            }
        }
    })
}
