//! Improvement-suggestion flow, optionally tailored to a job description.

use serde::{Deserialize, Serialize};

use crate::flows::{FlowError, FlowRegistry, IMPROVEMENT_SUGGESTIONS};
use crate::llm_client::{call_json, ModelClient};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsInput {
    pub resume_text: String,
    pub analysis_results: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsOutput {
    pub improvement_suggestions: String,
}

pub async fn generate_improvement_suggestions(
    llm: &dyn ModelClient,
    flows: &FlowRegistry,
    input: &SuggestionsInput,
) -> Result<SuggestionsOutput, FlowError> {
    let template = flows.get(IMPROVEMENT_SUGGESTIONS)?;
    let prompt = template.render(&[
        ("resume_text", input.resume_text.as_str()),
        ("analysis_results", input.analysis_results.as_str()),
        ("job_description", input.job_description.as_deref().unwrap_or("")),
    ]);
    Ok(call_json::<SuggestionsOutput>(llm, &prompt, &template.system).await?)
}
