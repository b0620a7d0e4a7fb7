use std::sync::Arc;

use crate::config::Config;
use crate::flows::match_job::JobMatcher;
use crate::flows::FlowRegistry;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ModelClient>,
    /// Prompt templates, built once at startup.
    pub flows: Arc<FlowRegistry>,
    /// Single-match backend used by `/match` and every bulk item.
    pub matcher: Arc<dyn JobMatcher>,
    pub config: Config,
}
