mod analytics;
mod config;
mod errors;
mod integrations;
mod models;
mod recommendations;
mod routes;
mod seed;
mod state;
mod store;
mod videos;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::integrations::build_http_client;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{JsonFileStore, VideoStore};
use crate::videos::files::ensure_directories;
use crate::videos::scheduler::spawn_scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shorts API v{}", env!("CARGO_PKG_VERSION"));

    ensure_directories(&config).await?;

    // Initialize the video store
    let json_store = JsonFileStore::open(config.data_file.clone()).await?;
    info!("Video store at {}", json_store.path().display());
    let store: Arc<dyn VideoStore> = Arc::new(json_store);

    // Initialize integration clients (keys are optional)
    let http = build_http_client()?;
    info!(
        "Integrations: search={} assets={} youtube={}",
        config.search_api_key.is_some(),
        config.asset_search_key.is_some(),
        config.youtube_api_key.is_some()
    );

    let state = AppState::new(config.clone(), store.clone(), http);

    // Publish scheduled videos in the background
    spawn_scheduler(
        store,
        config.posted_dir.clone(),
        config.schedule_interval_secs,
    );
    info!(
        "Scheduler running every {}s",
        config.schedule_interval_secs
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
