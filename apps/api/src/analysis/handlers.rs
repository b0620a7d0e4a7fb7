//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::bulk::{
    bulk_analyze, rank_results, BulkAnalysisResult, BulkAnalyzeRequest, BulkOptions,
};
use crate::analysis::single::{run_full_analysis, AnalysisState, FullAnalysisRequest};
use crate::errors::AppError;
use crate::flows::analyze_resume::{analyze_resume, AnalyzeResumeInput, AnalyzeResumeOutput};
use crate::flows::match_job::{MatchJobInput, MatchResult};
use crate::flows::suggestions::{
    generate_improvement_suggestions, SuggestionsInput, SuggestionsOutput,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAnalyzeResponse {
    pub batch_id: Uuid,
    pub results: Vec<BulkAnalysisResult>,
}

#[derive(Debug, Serialize)]
pub struct FlowListResponse {
    pub flows: Vec<&'static str>,
}

fn require_non_blank(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/flows
pub async fn handle_list_flows(State(state): State<AppState>) -> Json<FlowListResponse> {
    Json(FlowListResponse {
        flows: state.flows.names(),
    })
}

/// POST /api/v1/analysis/resume
///
/// Content, grammar and formatting critique of a single resume.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeInput>,
) -> Result<Json<AnalyzeResumeOutput>, AppError> {
    require_non_blank(&request.resume_text, "resumeText")?;

    let output = analyze_resume(state.llm.as_ref(), &state.flows, &request).await?;
    Ok(Json(output))
}

/// POST /api/v1/analysis/match
///
/// Compatibility score, reasoning and keyword comparison for one resume.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchJobInput>,
) -> Result<Json<MatchResult>, AppError> {
    require_non_blank(&request.resume_text, "resumeText")?;
    require_non_blank(&request.job_description, "jobDescription")?;

    let result = state.matcher.match_job(&request).await?;
    Ok(Json(result))
}

/// POST /api/v1/analysis/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionsInput>,
) -> Result<Json<SuggestionsOutput>, AppError> {
    require_non_blank(&request.resume_text, "resumeText")?;

    let output = generate_improvement_suggestions(state.llm.as_ref(), &state.flows, &request).await?;
    Ok(Json(output))
}

/// POST /api/v1/analysis/full
///
/// Composite report. Fails as a whole if any flow fails; no partial output.
pub async fn handle_full_analysis(
    State(state): State<AppState>,
    Json(request): Json<FullAnalysisRequest>,
) -> Result<Json<AnalysisState>, AppError> {
    require_non_blank(&request.resume_text, "resumeText")?;

    let report = run_full_analysis(state.llm.as_ref(), &state.flows, &request).await?;
    Ok(Json(report))
}

/// POST /api/v1/analysis/bulk
///
/// Scores every resume against the job description and returns them ranked,
/// highest score first. Individual failures come back as zero-score rows.
pub async fn handle_bulk_analyze(
    State(state): State<AppState>,
    Json(request): Json<BulkAnalyzeRequest>,
) -> Result<Json<BulkAnalyzeResponse>, AppError> {
    require_non_blank(&request.job_description, "jobDescription")?;

    if let Some(index) = request
        .resumes
        .iter()
        .position(|r| r.file_name.trim().is_empty())
    {
        return Err(AppError::Validation(format!(
            "resumes[{index}].fileName cannot be empty"
        )));
    }

    let batch_id = Uuid::new_v4();
    info!(
        "Bulk batch {} received with {} resumes",
        batch_id,
        request.resumes.len()
    );

    let options = BulkOptions::from(&state.config);
    let mut results = bulk_analyze(state.matcher.as_ref(), &request, options).await;
    rank_results(&mut results);

    Ok(Json(BulkAnalyzeResponse { batch_id, results }))
}
