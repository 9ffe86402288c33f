//! songbook-api - Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songbook_api::catalog::CatalogService;
use songbook_api::config::{Args, ServiceConfig};
use songbook_api::enrichment::EnrichmentClient;
use songbook_api::{build_router, AppState};
use songbook_common::db::init_database;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(args).context("Invalid configuration")?;

    // Initialize tracing; RUST_LOG takes precedence over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.filter_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting songbook-api v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database.display());
    info!("External API: {}", config.external_api_url);

    let db_pool = init_database(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    let enrichment = EnrichmentClient::new(config.external_api_url.clone(), &config.enrichment)
        .context("Failed to build enrichment client")?;
    let state = AppState::new(CatalogService::new(db_pool, enrichment));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
