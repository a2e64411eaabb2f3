//! readalong - book-club progress tracker
//!
//! Serves the progress form and dashboard over HTTP and rewrites the shared
//! sheet table after every change.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use readalong::config::{Args, Config};
use readalong::repo::ProgressRepository;
use readalong::sheet::{load_credentials, SheetClient};
use readalong::store::ProgressStore;
use readalong::{build_router, AppState, ConnectionStatus};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification immediately after tracing init
    info!(
        "Starting readalong v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = Config::resolve(&args);
    info!(
        "Sheet service: {} (table \"{}\")",
        config.sheet_url, config.table
    );

    // The secret provider is consulted once, here. A missing or malformed
    // credential file is reported but does not halt startup; later store
    // calls fail individually instead.
    let (token, mut connection) = match load_credentials(&config.credentials) {
        Ok(creds) => {
            info!("✓ Loaded sheet service credentials");
            (Some(creds.token), ConnectionStatus::ok())
        }
        Err(e) => {
            error!("Failed to load credentials: {}", e);
            let banner = format!("Error connecting to sheet service: {e}");
            (None, ConnectionStatus::failed(banner))
        }
    };

    let client = SheetClient::new(&config.sheet_url, token)
        .context("Failed to build sheet service client")?;
    let repo = ProgressRepository::new(client, config.table.clone());

    // Initial load fails soft: the dashboard starts empty and the banner
    // carries the load error.
    let store = match repo.load().await {
        Ok(store) => {
            info!("✓ Loaded {} progress entries", store.len());
            store
        }
        Err(e) => {
            error!("Failed to load progress data: {}", e);
            if connection.ok {
                connection =
                    ConnectionStatus::failed(format!("Error loading data from sheet service: {e}"));
            }
            ProgressStore::new()
        }
    };

    let state = AppState::new(store, repo, connection);
    let app = build_router(state, &config.photos_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("readalong listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
