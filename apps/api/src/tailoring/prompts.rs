// All LLM prompt templates for the Tailoring module.

/// Characters of resume text sent with a bullet rewrite.
pub const BULLETS_RESUME_CHARS: usize = 2000;
/// Characters of resume text sent with a full tailoring request.
pub const TAILOR_RESUME_CHARS: usize = 3000;
/// Characters of job description sent with a full tailoring request.
pub const TAILOR_JOB_CHARS: usize = 2000;
/// Missing keywords suggested to the model at most.
pub const TAILOR_KEYWORD_HINTS: usize = 15;

/// Bullet rewrite prompt. Replace `{resume_text}` before sending.
pub const BULLETS_PROMPT_TEMPLATE: &str =
    "Rewrite these resume bullets to be impactful using action verbs:\n{resume_text}";

/// Full tailoring prompt. Replace `{resume_text}` and `{job_text}` before sending.
pub const TAILOR_PROMPT_TEMPLATE: &str =
    "Rewrite this resume to match the job description perfectly:\nRESUME: {resume_text}\nJOB: {job_text}";

/// Appended to the tailoring prompt when a prior analysis found missing keywords.
/// Replace `{keywords}` before sending.
pub const KEYWORD_HINT_TEMPLATE: &str = "\nKEYWORDS MISSING FROM THE RESUME (work in only where the resume \
    genuinely supports them): {keywords}";
