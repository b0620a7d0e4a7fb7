//! Job-description matching — the single-match operation behind both the
//! `/match` endpoint and every item of a bulk analysis.
//!
//! The model's raw output is validated before it becomes a `MatchResult`:
//! the score must be a finite number in [0, 100] and is rounded to an integer;
//! keyword lists are treated as sets.
//!
//! `AppState` carries an `Arc<dyn JobMatcher>` so the bulk orchestrator can be
//! driven by a deterministic stub in tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::flows::{FlowError, FlowRegistry, MATCH_JOB_DESCRIPTION};
use crate::llm_client::{call_json, ModelClient};

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchJobInput {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordComparison {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub compatibility_score: u8,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_comparison: Option<KeywordComparison>,
}

/// Model output before range checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatchOutput {
    compatibility_score: f64,
    reasoning: String,
    #[serde(default)]
    keyword_comparison: Option<KeywordComparison>,
}

impl TryFrom<RawMatchOutput> for MatchResult {
    type Error = FlowError;

    fn try_from(raw: RawMatchOutput) -> Result<Self, Self::Error> {
        let compatibility_score = validate_score(raw.compatibility_score)?;

        let keyword_comparison = raw.keyword_comparison.map(|kc| KeywordComparison {
            matched: dedup_preserving_order(kc.matched),
            missing: dedup_preserving_order(kc.missing),
        });

        Ok(MatchResult {
            compatibility_score,
            reasoning: raw.reasoning,
            keyword_comparison,
        })
    }
}

fn validate_score(score: f64) -> Result<u8, FlowError> {
    if !score.is_finite() || score < MIN_SCORE as f64 || score > MAX_SCORE as f64 {
        return Err(FlowError::Schema {
            flow: MATCH_JOB_DESCRIPTION,
            message: format!("compatibilityScore {score} is outside [{MIN_SCORE}, {MAX_SCORE}]"),
        });
    }
    Ok(score.round() as u8)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Scores one resume against one job description via the model.
pub async fn match_job_description(
    llm: &dyn ModelClient,
    flows: &FlowRegistry,
    input: &MatchJobInput,
) -> Result<MatchResult, FlowError> {
    let template = flows.get(MATCH_JOB_DESCRIPTION)?;
    let prompt = template.render(&[
        ("resume_text", input.resume_text.as_str()),
        ("job_description", input.job_description.as_str()),
    ]);
    let raw: RawMatchOutput = call_json(llm, &prompt, &template.system).await?;
    MatchResult::try_from(raw)
}

/// The single-match operation as a swappable backend.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_job(&self, input: &MatchJobInput) -> Result<MatchResult, FlowError>;
}

/// Production matcher: the `matchJobDescription` flow over the shared model client.
pub struct LlmJobMatcher {
    llm: Arc<dyn ModelClient>,
    flows: Arc<FlowRegistry>,
}

impl LlmJobMatcher {
    pub fn new(llm: Arc<dyn ModelClient>, flows: Arc<FlowRegistry>) -> Self {
        Self { llm, flows }
    }
}

#[async_trait]
impl JobMatcher for LlmJobMatcher {
    async fn match_job(&self, input: &MatchJobInput) -> Result<MatchResult, FlowError> {
        match_job_description(self.llm.as_ref(), &self.flows, input).await
    }
}
