pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/flows", get(handlers::handle_list_flows))
        // Single-resume flows
        .route(
            "/api/v1/analysis/resume",
            post(handlers::handle_analyze_resume),
        )
        .route("/api/v1/analysis/match", post(handlers::handle_match))
        .route(
            "/api/v1/analysis/suggestions",
            post(handlers::handle_suggestions),
        )
        .route("/api/v1/analysis/full", post(handlers::handle_full_analysis))
        // Bulk scoring
        .route("/api/v1/analysis/bulk", post(handlers::handle_bulk_analyze))
        .fallback(not_found)
        .with_state(state)
}
