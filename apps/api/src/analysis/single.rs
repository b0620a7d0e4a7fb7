//! Full single-resume analysis: critique + optional job match, then suggestions.
//!
//! All-or-nothing. Unlike bulk mode, any failing flow aborts the whole report.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::flows::analyze_resume::{analyze_resume, AnalyzeResumeInput, AnalyzeResumeOutput};
use crate::flows::match_job::{match_job_description, MatchJobInput, MatchResult};
use crate::flows::suggestions::{
    generate_improvement_suggestions, SuggestionsInput, SuggestionsOutput,
};
use crate::flows::{FlowError, FlowRegistry};
use crate::llm_client::ModelClient;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullAnalysisRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl FullAnalysisRequest {
    /// The trimmed job description, if one was given and is not blank.
    fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .map(str::trim)
            .filter(|jd| !jd.is_empty())
    }
}

/// Composite report. `match` is null when no job description was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisState {
    pub analysis: AnalyzeResumeOutput,
    #[serde(rename = "match")]
    pub job_match: Option<MatchResult>,
    pub suggestions: SuggestionsOutput,
}

/// Runs analysis and matching concurrently, then generates suggestions from
/// the combined feedback.
pub async fn run_full_analysis(
    llm: &dyn ModelClient,
    flows: &FlowRegistry,
    request: &FullAnalysisRequest,
) -> Result<AnalysisState, FlowError> {
    let job_description = request.job_description();

    let analysis_input = AnalyzeResumeInput {
        resume_text: request.resume_text.clone(),
    };
    let analysis = analyze_resume(llm, flows, &analysis_input);

    let job_match = async {
        // Trimming only decides whether to match; the model sees the text as given.
        match job_description.and(request.job_description.as_deref()) {
            Some(raw) => {
                let input = MatchJobInput {
                    resume_text: request.resume_text.clone(),
                    job_description: raw.to_string(),
                };
                match_job_description(llm, flows, &input).await.map(Some)
            }
            None => Ok(None),
        }
    };

    let (analysis, job_match) = tokio::try_join!(analysis, job_match)?;

    let suggestions_input = SuggestionsInput {
        resume_text: request.resume_text.clone(),
        analysis_results: analysis.combined(),
        job_description: job_description.map(str::to_string),
    };
    let suggestions = generate_improvement_suggestions(llm, flows, &suggestions_input).await?;

    info!(
        "Full analysis complete (job match: {})",
        job_match
            .as_ref()
            .map(|m| m.compatibility_score.to_string())
            .unwrap_or_else(|| "skipped".to_string())
    );

    Ok(AnalysisState {
        analysis,
        job_match,
        suggestions,
    })
}
