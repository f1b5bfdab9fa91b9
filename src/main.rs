//! Moe Counter - A hit-counter badge server
//!
//! Serves SVG counter badges and persists counts in gated batches.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moe_counter::api::{create_router, AppState};
use moe_counter::store::{CounterStore, JsonFileStore, MemoryStore};
use moe_counter::{spawn_flush_timer, Config, HitCounter};

/// Main entry point for the counter server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the durable store and build the hit counter
/// 4. Start the background flush timer
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, stop the timer and drain pending counts
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moe_counter=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Moe Counter");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, flush_interval={}s, digit_places={}, theme={}",
        config.server_port, config.flush_interval, config.digit_places, config.default_theme
    );

    let store: Arc<dyn CounterStore> = match &config.store_path {
        Some(path) => {
            let store = JsonFileStore::open(path)
                .await
                .with_context(|| format!("failed to open store at {}", path.display()))?;
            info!("Counts persisted to {}", store.path().display());
            Arc::new(store)
        }
        None => {
            warn!("STORE_PATH not set, counts are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let counter = Arc::new(HitCounter::new(store));
    let flush_timer = spawn_flush_timer(counter.gate().clone(), config.flush_interval);
    info!("Background flush timer started");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = create_router(AppState::new(counter.clone(), config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    flush_timer.abort();
    warn!("Flush timer aborted");
    counter.drain().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
