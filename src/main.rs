//! Cache Adapter - HTTP server over a namespaced in-memory cache
//!
//! Serves the adapter operations over a REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_adapter::{
    api::create_router, spawn_sweeper, AdapterConfig, AppState, EnvConfigSource, ServerConfig,
    StoreRegistry,
};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load server and adapter configuration from environment variables
/// 3. Create the in-memory store and bind the adapter to it
/// 4. Start the background expiry sweeper
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_adapter=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache adapter server");

    let config = ServerConfig::from_env();
    let adapter = AdapterConfig::from_source(&EnvConfigSource::new())
        .context("invalid adapter configuration (set CACHE_KEY_PREFIX and CACHE_DEFAULT_TTL)")?;
    info!(
        "Configuration loaded: prefix={:?}, default_ttl={}s, max_entries={}, port={}, sweep_interval={}s",
        adapter.key_prefix(),
        adapter.default_ttl(),
        config.max_entries,
        config.server_port,
        config.sweep_interval
    );

    let registry = StoreRegistry::new();
    let state = AppState::from_config(&config, adapter, &registry)?;

    let sweeper = spawn_sweeper(Arc::clone(state.cache.store()), config.sweep_interval);
    info!("Background expiry sweeper started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper and allows graceful shutdown.
async fn shutdown_signal(sweeper: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    sweeper.abort();
    warn!("Expiry sweeper aborted");
}
