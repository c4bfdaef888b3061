//! Review Cache - review dashboard API server
//!
//! Serves listings and reviews through per-resource TTL caches.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_cache::{create_router, AppState, CacheRegistry, Config, ReviewStore};

/// Main entry point for the review cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the dataset from `DATA_FILE`, or the built-in sample
/// 4. Create the cache registry, which starts one sweep per cache
/// 5. Serve the router until SIGINT/SIGTERM, then destroy the caches
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sweep_interval={}s, cache_max_age={}s",
        config.server_port, config.sweep_interval, config.cache_max_age
    );

    let store = match &config.data_file {
        Some(path) => ReviewStore::load(path)
            .await
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        None => {
            warn!("DATA_FILE not set, serving sample data");
            ReviewStore::sample()
        }
    };

    let caches = CacheRegistry::from_config(&config).context("failed to create caches")?;
    info!("Caches initialized");

    let app = create_router(AppState::new(store, caches.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(caches))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then destroys every cache.
async fn shutdown_signal(caches: CacheRegistry) {
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

    caches.destroy_all().await;
}
