//! Resume rewriting — builds prompts from resume/job text and calls the text generator.
//!
//! Inputs are truncated by characters before prompting so long uploads stay within the
//! model's budget. A prior `MatchResult`, when available, contributes its missing keywords.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, truncate_chars, RESUME_WRITER_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::matching::analyzer::MatchResult;
use crate::tailoring::prompts::{
    BULLETS_PROMPT_TEMPLATE, BULLETS_RESUME_CHARS, KEYWORD_HINT_TEMPLATE, TAILOR_JOB_CHARS,
    TAILOR_KEYWORD_HINTS, TAILOR_PROMPT_TEMPLATE, TAILOR_RESUME_CHARS,
};

pub fn build_bullets_prompt(resume_text: &str) -> String {
    fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[(
            "resume_text",
            truncate_chars(resume_text, BULLETS_RESUME_CHARS),
        )],
    )
}

pub fn build_tailor_prompt(
    resume_text: &str,
    job_text: &str,
    analysis: Option<&MatchResult>,
) -> String {
    let mut prompt = fill_template(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("resume_text", truncate_chars(resume_text, TAILOR_RESUME_CHARS)),
            ("job_text", truncate_chars(job_text, TAILOR_JOB_CHARS)),
        ],
    );

    if let Some(result) = analysis.filter(|r| !r.missing.is_empty()) {
        let keywords = result
            .missing
            .iter()
            .take(TAILOR_KEYWORD_HINTS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&fill_template(
            KEYWORD_HINT_TEMPLATE,
            &[("keywords", keywords.as_str())],
        ));
    }

    prompt
}

/// Rewrites resume bullets with stronger action verbs.
pub async fn rewrite_bullets(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<String, AppError> {
    let prompt = build_bullets_prompt(resume_text);
    info!("Requesting bullet rewrite ({} prompt chars)", prompt.chars().count());
    llm.generate(&prompt, RESUME_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Bullet rewrite failed: {e}")))
}

/// Produces a full resume rewritten toward the job description.
pub async fn tailor_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_text: &str,
    analysis: Option<&MatchResult>,
) -> Result<String, AppError> {
    let prompt = build_tailor_prompt(resume_text, job_text, analysis);
    info!(
        "Requesting tailored resume ({} prompt chars, {} keyword hints)",
        prompt.chars().count(),
        analysis.map_or(0, |r| r.missing.len().min(TAILOR_KEYWORD_HINTS))
    );
    llm.generate(&prompt, RESUME_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume tailoring failed: {e}")))
}
