// Shared prompt constants.
// Each flow defines its own templates in flows/prompts.rs; this file holds
// the cross-cutting fragments they are assembled from.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona shared by the resume-review flows.
pub const RESUME_EXPERT_PERSONA: &str = "You are a resume expert and career coach \
    who gives specific, honest, actionable feedback.";
