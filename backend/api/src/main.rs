//! Fundraiser API — entry point.
//!
//! Seeds the in-memory campaign store and serves the Axum REST facade the
//! mobile client talks to. Everything lives in process memory: restarting
//! the server resets campaigns and donations to the seed data.

mod api;
mod config;
mod errors;
mod models;
mod seed;
mod store;

use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use config::Config;
use store::CampaignStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Load config from environment.
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    api::set_development_mode(config.dev_mode);

    let state = Arc::new(AppState {
        store: CampaignStore::with_seed_data(),
        started_at: Instant::now(),
    });

    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Server running on http://{addr}");
    info!("Environment: {}", config.app_env);
    info!("Health check: http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
