//! store-catalog server entry point.
//!
//! Loads configuration, prepares the database schema, and serves the REST
//! API until Ctrl-C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use store_catalog::api;
use store_catalog::app_state::AppState;
use store_catalog::config::CatalogConfig;
use store_catalog::persistence::{CatalogRepository, InMemoryCatalog, PostgresCatalog};
use store_catalog::service::CatalogService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = CatalogConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting store-catalog");

    // Build persistence layer
    let repository: Arc<dyn CatalogRepository> = if config.persistence_enabled {
        Arc::new(
            PostgresCatalog::connect(&config)
                .await
                .context("failed to connect to PostgreSQL")?,
        )
    } else {
        tracing::warn!("persistence disabled, data will not survive a restart");
        Arc::new(InMemoryCatalog::new())
    };
    repository
        .init_schema()
        .await
        .context("failed to initialize database schema")?;

    // Build application state
    let app_state = AppState::new(CatalogService::new(repository));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, api::app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
