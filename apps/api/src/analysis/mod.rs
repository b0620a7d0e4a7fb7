// Resume analysis orchestration: the composite single-resume report and the
// bulk scorer. Model calls go through flows; no direct LLM access here.

pub mod bulk;
pub mod handlers;
pub mod single;
