//! Resume critique flow: content, grammar, formatting, overall feedback.

use serde::{Deserialize, Serialize};

use crate::flows::{FlowError, FlowRegistry, ANALYZE_RESUME};
use crate::llm_client::{call_json, ModelClient};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeInput {
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeOutput {
    pub content_feedback: String,
    pub grammar_feedback: String,
    pub formatting_feedback: String,
    pub overall_feedback: String,
}

impl AnalyzeResumeOutput {
    /// All feedback sections joined by blank lines, in schema order.
    pub fn combined(&self) -> String {
        [
            self.content_feedback.as_str(),
            self.grammar_feedback.as_str(),
            self.formatting_feedback.as_str(),
            self.overall_feedback.as_str(),
        ]
        .join("\n\n")
    }
}

pub async fn analyze_resume(
    llm: &dyn ModelClient,
    flows: &FlowRegistry,
    input: &AnalyzeResumeInput,
) -> Result<AnalyzeResumeOutput, FlowError> {
    let template = flows.get(ANALYZE_RESUME)?;
    let prompt = template.render(&[("resume_text", input.resume_text.as_str())]);
    Ok(call_json::<AnalyzeResumeOutput>(llm, &prompt, &template.system).await?)
}
