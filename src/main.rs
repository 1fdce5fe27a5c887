//! Memory Cache - An in-memory TTL cache server
//!
//! Binary entry point: configuration, logging, cache, reaper and HTTP server.

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memory_cache::api::create_router;
use memory_cache::{AppState, Cache, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Print configuration help for `-h`/`--help` and exit
/// 2. Initialize tracing subscriber for logging
/// 3. Load configuration from environment variables
/// 4. Create the cache and start its reaper
/// 5. Start HTTP server on the configured address
/// 6. On SIGINT/SIGTERM, stop the reaper and shut the server down gracefully
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(arg) = std::env::args().nth(1) {
        if arg == "-h" || arg == "--help" {
            print!("{}", Config::usage());
            return Ok(());
        }
    }

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memory_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: listen_address={}, cleaning_interval={:?}",
        config.listen_address, config.cleaning_interval
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let cache = Cache::new(config.cleaning_interval, shutdown_rx);
    cache.start().await?;
    info!(
        "Start cache with cleaning interval: {:?}",
        config.cleaning_interval
    );

    let app = create_router(AppState::new(cache.clone()));

    let listener = tokio::net::TcpListener::bind(&config.listen_address)
        .await
        .with_context(|| format!("listen on address {}", config.listen_address))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("serve HTTP")?;

    cache.stopped().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then cancels the reaper.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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

    info!("Stopping cache");
    if shutdown_tx.send(true).is_err() {
        warn!("Reaper already gone");
    }
}
