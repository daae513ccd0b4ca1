//! Product Catalog - A REST API over a product table
//!
//! Serves CRUD operations on products, with a TTL-cached listing that every
//! mutation invalidates.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_catalog::api::{create_router, AppState};
use product_catalog::{seed, spawn_cache_sweeper, Config, MemoryProductStore};

/// Main entry point for the product catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the product store and catalog
/// 4. Seed starter products if requested
/// 5. Start background cache sweeper
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Catalog Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, cleanup_interval={}s, seed_on_start={}",
        config.server_port, config.cache_ttl, config.cleanup_interval, config.seed_on_start
    );

    let state = AppState::from_config(&config, Arc::new(MemoryProductStore::new()));
    info!("Product store initialized");

    if config.seed_on_start {
        let inserted = seed::seed(&state.catalog)
            .await
            .context("seeding starter products")?;
        info!("Seeded {} products", inserted);
    }

    let sweeper_handle = spawn_cache_sweeper(state.catalog.cache(), config.cleanup_interval());
    info!("Background cache sweeper started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweeper_handle.abort();
    warn!("Cache sweeper aborted");
}
