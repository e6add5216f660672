//! Clinyx Web Server
//!
//! Run with: cargo run -p clinyx-web

use std::sync::Arc;

use anyhow::Context;
use clinyx_catalog::{BuildOptions, CatalogProvider, FileCatalogProvider, SeedCatalogProvider};
use clinyx_config::{Config, BIND_ENV};
use clinyx_web::{router::build_router, state::AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config is read before logging so the filter can come from it.
    // Only a missing file falls back to the defaults.
    let loaded = Config::load_optional().context("failed to load configuration")?;
    let config = loaded.clone().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    if loaded.is_none() {
        warn!("no configuration file found; using defaults");
    }
    let config = config.with_bind_override(std::env::var(BIND_ENV).ok());

    info!("Starting Clinyx Web Server...");

    let options = if config.catalog.strict { BuildOptions::strict() } else { BuildOptions::default() };
    let provider: Arc<dyn CatalogProvider> = match &config.catalog.path {
        Some(path) => Arc::new(FileCatalogProvider::new(path.clone(), options)),
        None => Arc::new(SeedCatalogProvider::new(options)),
    };

    let state = AppState::new(provider, config.inference.clone())
        .context("failed to build the initial catalog")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
