//! `leadform` server entry point.
//!
//! Opens the configured document store once, then starts the Axum HTTP
//! server with graceful shutdown. If the store cannot be opened the server
//! still starts; the form then reports the database as unavailable.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use leadform_core::clock::SystemClock;
use leadform_server::config::ServerConfig;
use leadform_server::routes;
use leadform_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(site = %config.site.name, "leadform starting");

    let store = match leadform_storage::connect(&config.store).await {
        Ok(store) => {
            info!(backend = store.backend(), "document store ready");
            Some(store)
        }
        Err(e) => {
            error!(error = %e, "document store unavailable, submissions will be refused");
            None
        }
    };

    let state = Arc::new(AppState {
        store,
        clock: Arc::new(SystemClock),
        site: config.site.clone(),
    });

    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "leadform server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("leadform server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
