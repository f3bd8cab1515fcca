// Resume tailoring: LLM rewrites of resume text.
// All LLM calls go through llm_client::TextGenerator — no direct API calls here.

pub mod handlers;
pub mod prompts;
pub mod rewriter;
