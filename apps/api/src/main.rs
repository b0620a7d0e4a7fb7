mod analysis;
mod config;
mod errors;
mod flows;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::flows::match_job::LlmJobMatcher;
use crate::flows::FlowRegistry;
use crate::llm_client::{LlmClient, ModelClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn ModelClient> = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_api_url.clone(),
    )?);
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.llm_api_url
    );

    // Prompt registry, shared by every flow
    let flows = Arc::new(FlowRegistry::with_defaults());
    info!("Registered flows: {}", flows.names().join(", "));

    let matcher = Arc::new(LlmJobMatcher::new(llm.clone(), flows.clone()));

    match config.bulk_max_concurrency {
        Some(limit) => info!("Bulk analysis concurrency capped at {limit}"),
        None => info!("Bulk analysis concurrency is unbounded"),
    }

    // Build app state
    let state = AppState {
        llm,
        flows,
        matcher,
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
