//! Bulk analysis — scores one job description against many resumes.
//!
//! Every resume is matched concurrently behind its own error boundary. A failed
//! match becomes a zero-score sentinel for that resume only; the batch always
//! returns exactly one result per input, in input order.
//!
//! Fan-out is unbounded unless `BulkOptions::max_concurrency` is set.
//! Futures are joined on the calling task; nothing is spawned.

use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::Config;
use crate::flows::match_job::{JobMatcher, MatchJobInput, MatchResult};
use crate::flows::FlowError;

/// Reasoning attached to a resume whose match failed.
pub const FAILED_ANALYSIS_REASONING: &str = "Failed to analyze this resume due to an error.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItem {
    pub file_name: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAnalyzeRequest {
    pub job_description: String,
    pub resumes: Vec<ResumeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAnalysisResult {
    pub file_name: String,
    pub compatibility_score: u8,
    pub reasoning: String,
}

impl BulkAnalysisResult {
    fn matched(file_name: &str, result: MatchResult) -> Self {
        Self {
            file_name: file_name.to_string(),
            compatibility_score: result.compatibility_score,
            reasoning: result.reasoning,
        }
    }

    /// The sentinel substituted for a resume whose match failed.
    pub fn failed(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            compatibility_score: 0,
            reasoning: FAILED_ANALYSIS_REASONING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BulkOptions {
    pub max_concurrency: Option<usize>,
    pub item_timeout: Option<Duration>,
}

impl From<&Config> for BulkOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_concurrency: config.bulk_max_concurrency,
            item_timeout: config.bulk_item_timeout(),
        }
    }
}

/// Matches every resume against the job description and waits for all of them.
///
/// Never fails: per-resume errors are logged and replaced by
/// [`BulkAnalysisResult::failed`]. Output order equals input order.
pub async fn bulk_analyze(
    matcher: &dyn JobMatcher,
    request: &BulkAnalyzeRequest,
    options: BulkOptions,
) -> Vec<BulkAnalysisResult> {
    info!(
        "Bulk analysis of {} resumes (max_concurrency={:?}, item_timeout={:?})",
        request.resumes.len(),
        options.max_concurrency,
        options.item_timeout
    );

    let limiter = options
        .max_concurrency
        .map(|n| Semaphore::new(n.min(Semaphore::MAX_PERMITS)));

    let analyses = request.resumes.iter().map(|resume| {
        analyze_one(
            matcher,
            &request.job_description,
            resume,
            limiter.as_ref(),
            options.item_timeout,
        )
    });

    let outcomes = join_all(analyses).await;

    let failed = outcomes.iter().filter(|(_, failed)| *failed).count();
    info!(
        "Bulk analysis finished: {} scored, {} failed",
        outcomes.len() - failed,
        failed
    );

    outcomes.into_iter().map(|(result, _)| result).collect()
}

/// Error boundary for a single resume. The flag is true when the match failed
/// and the result is the sentinel.
async fn analyze_one(
    matcher: &dyn JobMatcher,
    job_description: &str,
    resume: &ResumeItem,
    limiter: Option<&Semaphore>,
    item_timeout: Option<Duration>,
) -> (BulkAnalysisResult, bool) {
    // acquire() only fails on a closed semaphore; this one is never closed.
    let _permit = match limiter {
        Some(semaphore) => semaphore.acquire().await.ok(),
        None => None,
    };

    let input = MatchJobInput {
        resume_text: resume.resume_text.clone(),
        job_description: job_description.to_string(),
    };

    let outcome = match item_timeout {
        Some(limit) => tokio::time::timeout(limit, matcher.match_job(&input))
            .await
            .unwrap_or(Err(FlowError::Timeout(limit))),
        None => matcher.match_job(&input).await,
    };

    match outcome {
        Ok(result) => (BulkAnalysisResult::matched(&resume.file_name, result), false),
        Err(e) => {
            warn!("Failed to analyze resume {}: {}", resume.file_name, e);
            (BulkAnalysisResult::failed(&resume.file_name), true)
        }
    }
}

/// Orders results by compatibility score, highest first. Ties keep their input order.
pub fn rank_results(results: &mut [BulkAnalysisResult]) {
    results.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
}
