//! Flows — named, schema-validated operations that render a prompt, send it to
//! the model, and parse the structured response.
//!
//! Templates live in a `FlowRegistry` built once at startup and handed to each
//! flow by reference. Flows are free functions over `&dyn ModelClient`.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RESUME_EXPERT_PERSONA};
use crate::llm_client::LlmError;

pub mod analyze_resume;
pub mod match_job;
pub mod prompts;
pub mod suggestions;

pub const ANALYZE_RESUME: &str = "analyzeResume";
pub const MATCH_JOB_DESCRIPTION: &str = "matchJobDescription";
pub const IMPROVEMENT_SUGGESTIONS: &str = "generateImprovementSuggestions";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Unknown flow: {0}")]
    UnknownFlow(String),

    #[error("Model invocation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Output of {flow} failed schema validation: {message}")]
    Schema { flow: &'static str, message: String },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl From<FlowError> for AppError {
    fn from(e: FlowError) -> Self {
        AppError::Llm(e.to_string())
    }
}

/// A named prompt with its system instruction.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub system: String,
    pub template: &'static str,
}

impl PromptTemplate {
    /// Substitutes `{key}` placeholders in a single pass.
    ///
    /// Inserted values are never re-scanned, and braces that do not enclose a
    /// known key (JSON examples, stray text) are copied through unchanged.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let substitution = after.find('}').and_then(|end| {
                let key = &after[..end];
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, value)| (end, *value))
            });

            match substitution {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Registry of prompt templates keyed by flow name.
#[derive(Debug, Clone, Default)]
pub struct FlowRegistry {
    templates: BTreeMap<&'static str, PromptTemplate>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the three resume flows.
    pub fn with_defaults() -> Self {
        let system = format!("{RESUME_EXPERT_PERSONA} {JSON_ONLY_SYSTEM}");
        let ats_system = format!("{} {JSON_ONLY_SYSTEM}", prompts::ATS_PERSONA);

        let mut registry = Self::new();
        registry.register(PromptTemplate {
            name: ANALYZE_RESUME,
            system: system.clone(),
            template: prompts::ANALYZE_RESUME_TEMPLATE,
        });
        registry.register(PromptTemplate {
            name: MATCH_JOB_DESCRIPTION,
            system: ats_system,
            template: prompts::MATCH_JOB_DESCRIPTION_TEMPLATE,
        });
        registry.register(PromptTemplate {
            name: IMPROVEMENT_SUGGESTIONS,
            system,
            template: prompts::IMPROVEMENT_SUGGESTIONS_TEMPLATE,
        });
        registry
    }

    /// Adds a template, replacing any previous one with the same name.
    pub fn register(&mut self, template: PromptTemplate) {
        self.templates.insert(template.name, template);
    }

    pub fn get(&self, name: &str) -> Result<&PromptTemplate, FlowError> {
        self.templates
            .get(name)
            .ok_or_else(|| FlowError::UnknownFlow(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.templates.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &'static str) -> PromptTemplate {
        PromptTemplate {
            name: "test",
            system: String::new(),
            template: text,
        }
    }

    #[test]
    fn test_render_substitutes_known_keys() {
        let t = template("Resume:\n{resume_text}\n\nJob:\n{job_description}");
        let rendered = t.render(&[("resume_text", "Rust dev"), ("job_description", "Go dev")]);
        assert_eq!(rendered, "Resume:\nRust dev\n\nJob:\nGo dev");
    }

    #[test]
    fn test_render_keeps_json_braces() {
        let t = template("Return {\n  \"score\": 0\n} for {name}");
        let rendered = t.render(&[("name", "x")]);
        assert_eq!(rendered, "Return {\n  \"score\": 0\n} for x");
    }

    #[test]
    fn test_render_does_not_rescan_inserted_values() {
        let t = template("{resume_text} | {job_description}");
        let rendered = t.render(&[
            ("resume_text", "I wrote {job_description} once"),
            ("job_description", "JD"),
        ]);
        assert_eq!(rendered, "I wrote {job_description} once | JD");
    }

    #[test]
    fn test_render_unknown_placeholder_left_alone() {
        let t = template("a {missing} b {");
        assert_eq!(t.render(&[]), "a {missing} b {");
    }

    #[test]
    fn test_default_registry_has_all_flows() {
        let registry = FlowRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![ANALYZE_RESUME, IMPROVEMENT_SUGGESTIONS, MATCH_JOB_DESCRIPTION]
        );
        for name in registry.names() {
            let t = registry.get(name).unwrap();
            assert!(t.system.contains("valid JSON only"));
        }
    }

    #[test]
    fn test_unknown_flow_is_error() {
        let registry = FlowRegistry::new();
        let err = registry.get(ANALYZE_RESUME).unwrap_err();
        assert!(matches!(err, FlowError::UnknownFlow(ref n) if n == ANALYZE_RESUME));
    }

    #[test]
    fn test_flow_error_maps_to_llm_app_error() {
        let app: AppError = FlowError::UnknownFlow("x".to_string()).into();
        assert!(matches!(app, AppError::Llm(_)));
    }
}
