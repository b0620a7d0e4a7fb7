//! Stub backends shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::flows::match_job::{JobMatcher, MatchJobInput, MatchResult};
use crate::flows::{FlowError, FlowRegistry};
use crate::llm_client::{LlmError, ModelClient, ANTHROPIC_API_URL};
use crate::state::AppState;

type Responder = dyn Fn(&str, &str) -> Result<String, LlmError> + Send + Sync;

/// Model client that answers from a closure and records every prompt it sees.
pub struct StubModelClient {
    responder: Box<Responder>,
    prompts: Mutex<Vec<String>>,
}

impl StubModelClient {
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::with(move |_, _| Ok(reply.clone()))
    }

    pub fn unavailable() -> Self {
        Self::with(|_, _| Err(service_unavailable()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(system, prompt)
    }
}

pub fn service_unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "model unavailable".to_string(),
    }
}

type MatchFn = dyn Fn(&MatchJobInput) -> Result<MatchResult, FlowError> + Send + Sync;

/// Deterministic matcher driven by a closure over the input.
pub struct StubMatcher {
    respond: Box<MatchFn>,
}

impl StubMatcher {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&MatchJobInput) -> Result<MatchResult, FlowError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
        }
    }

    /// Scores each resume by the length of its text, capped at 100.
    pub fn by_length() -> Self {
        Self::new(|input| Ok(scored(input.resume_text.len().min(100) as u8)))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(FlowError::Llm(service_unavailable())))
    }
}

#[async_trait]
impl JobMatcher for StubMatcher {
    async fn match_job(&self, input: &MatchJobInput) -> Result<MatchResult, FlowError> {
        (self.respond)(input)
    }
}

pub fn scored(score: u8) -> MatchResult {
    MatchResult {
        compatibility_score: score,
        reasoning: format!("Scored {score}."),
        keyword_comparison: None,
    }
}

pub fn test_config() -> Config {
    Config {
        anthropic_api_key: "test-key".to_string(),
        llm_api_url: ANTHROPIC_API_URL.to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        bulk_max_concurrency: None,
        bulk_item_timeout_secs: None,
    }
}

pub fn test_state(llm: StubModelClient, matcher: StubMatcher) -> AppState {
    AppState {
        llm: Arc::new(llm),
        flows: Arc::new(FlowRegistry::with_defaults()),
        matcher: Arc::new(matcher),
        config: test_config(),
    }
}
