// ABOUTME: Lendflow service runtime
// ABOUTME: Logging bootstrap, HTTP server startup and one-shot ingestion for the command line

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use lendflow_api::{create_router, AppState};
use lendflow_config::Config;
use lendflow_core::Credential;
use lendflow_deals::IngestionOutcome;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// CORS layer allowing the dashboard origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state).layer(cors_layer(&config.cors_origin)?);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Lendflow API listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a single submission through the ingestion pipeline
pub async fn ingest_once(
    config: &Config,
    content: &str,
    token: &str,
) -> anyhow::Result<IngestionOutcome> {
    let state = AppState::from_config(config)?;
    let outcome = state
        .ingestion
        .ingest(content, Credential::bearer(token))
        .await?;
    Ok(outcome)
}
