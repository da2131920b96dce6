mod config;
mod crew;
mod errors;
mod llm_client;
mod models;
mod report;
mod routes;
mod simulation;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, ModelProfile};
use crate::routes::build_router;
use crate::simulation::job::JobTracker;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Simulator API v{}", env!("CARGO_PKG_VERSION"));

    // Reports are written lazily on download; create the directory up front so
    // permission problems show at startup.
    tokio::fs::create_dir_all(&config.reports_dir).await?;
    info!("Reports directory: {}", config.reports_dir.display());

    // Initialize LLM client. Credentials arrive per request.
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (endpoint: {}, model: {})",
        config.llm_base_url,
        llm.model_for(ModelProfile::Assessment)
    );

    // Build app state
    let state = AppState {
        jobs: JobTracker::new(),
        llm: Arc::new(llm),
        config: config.clone(),
    };

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
