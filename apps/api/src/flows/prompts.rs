// Prompt templates for the resume flows.
// Placeholders use `{name}` and are filled by `PromptTemplate::render`.

/// Persona for job matching.
pub const ATS_PERSONA: &str = "You are a highly sophisticated Applicant Tracking System (ATS) \
    that analyzes resumes against job descriptions with high precision.";

/// Resume critique. Replace: {resume_text}
pub const ANALYZE_RESUME_TEMPLATE: &str = r#"Analyze the following resume for content, grammar, and formatting. Provide specific feedback in each area.

Resume:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "contentFeedback": "Feedback on the resume content.",
  "grammarFeedback": "Feedback on the grammar and spelling.",
  "formattingFeedback": "Feedback on the resume formatting.",
  "overallFeedback": "Overall feedback and suggestions for the resume."
}"#;

/// Resume vs job description. Replace: {resume_text}, {job_description}
pub const MATCH_JOB_DESCRIPTION_TEMPLATE: &str = r#"Analyze the resume against the job description.

1. EXTRACT REQUIREMENTS from the job description:
   - Must-have skills (e.g. "React Native", "TypeScript", "Node.js")
   - Years of experience (e.g. "5+ years of experience in software development")
   - Specific qualifications (e.g. "B.S. in Computer Science", "experience with GraphQL")
   - Soft skills (e.g. "team leadership", "agile methodologies")

2. ANALYZE THE RESUME for evidence of each requirement. Be precise: if the job requires
   "React Native", "React" is NOT a full match. They are different technologies.

3. SCORE compatibility from 0 to 100 based on alignment with the SPECIFIC requirements.
   A candidate missing a must-have skill must receive a significantly lower score.

4. REASONING: point-by-point. For each key requirement, state whether it was found in the
   resume and where.

5. KEYWORDS: list important job-description keywords matched in the resume, and those missing.

Return a JSON object with this EXACT schema (no extra fields):
{
  "compatibilityScore": 72,
  "reasoning": "Point-by-point reasoning comparing resume details to job requirements.",
  "keywordComparison": {
    "matched": ["Kubernetes"],
    "missing": ["Terraform"]
  }
}

compatibilityScore MUST be an integer between 0 and 100.

Resume:
{resume_text}

Job Description:
{job_description}"#;

/// Improvement suggestions. Replace: {resume_text}, {analysis_results}, {job_description}
pub const IMPROVEMENT_SUGGESTIONS_TEMPLATE: &str = r#"Provide specific, actionable recommendations for improving the resume based on the analysis results below. If a job description is provided, tailor the recommendations towards it.

Resume:
{resume_text}

Analysis Results:
{analysis_results}

Job Description (if provided):
{job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "improvementSuggestions": "Specific, actionable recommendations for improving the resume."
}"#;
