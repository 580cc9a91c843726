//! Depot server: file hosting API with background image derivatives.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use depot_api::app::{Depot, build_app};
use depot_core::config::AppConfig;
use depot_core::error::{AppError, ErrorKind};

#[tokio::main]
async fn main() {
    let env = std::env::var("DEPOT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Depot v{}", env!("CARGO_PKG_VERSION"));

    let worker_enabled = config.worker.enabled;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let depot = Depot::assemble(config).await?;
    let Depot {
        state, db, runner, ..
    } = depot;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = if worker_enabled {
        let runner = Arc::new(runner);
        Some(tokio::spawn(async move { runner.run(shutdown_rx).await }))
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "HTTP server failed", e))?;

    tracing::info!("HTTP server stopped, stopping worker");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Worker task panicked");
        }
    }

    db.close().await;
    tracing::info!("Depot shut down");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
