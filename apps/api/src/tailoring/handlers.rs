//! Axum route handlers for the Tailoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::rewriter::{rewrite_bullets, tailor_resume};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RewriteBulletsRequest {
    pub resume_text: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RewriteBulletsResponse {
    pub session_id: Uuid,
    pub improved_bullets: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorResumeRequest {
    pub resume_text: String,
    pub job_text: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TailorResumeResponse {
    pub session_id: Uuid,
    pub tailored_resume: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor/bullets
///
/// Rewrites resume bullets with action verbs and stores them on the session.
pub async fn handle_rewrite_bullets(
    State(state): State<AppState>,
    Json(request): Json<RewriteBulletsRequest>,
) -> Result<Json<RewriteBulletsResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    state.sessions.ensure_exists(request.session_id).await?;

    let improved_bullets = rewrite_bullets(state.llm.as_ref(), &request.resume_text).await?;

    let session_id = state
        .sessions
        .restore_and_update(request.session_id, |s| {
            s.improved_bullets = Some(improved_bullets.clone())
        })
        .await?;

    Ok(Json(RewriteBulletsResponse {
        session_id,
        improved_bullets,
    }))
}

/// POST /api/v1/tailor/resume
///
/// Generates a full resume tailored to the job description. Keywords the job asks for but
/// the resume lacks are computed from this request's texts and passed to the model as hints.
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(request): Json<TailorResumeRequest>,
) -> Result<Json<TailorResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }
    state.sessions.ensure_exists(request.session_id).await?;

    let analysis = state
        .analyzer
        .analyze(&request.resume_text, &request.job_text);

    let tailored_resume = tailor_resume(
        state.llm.as_ref(),
        &request.resume_text,
        &request.job_text,
        Some(&analysis),
    )
    .await?;

    let session_id = state
        .sessions
        .restore_and_update(request.session_id, |s| {
            s.tailored_resume = Some(tailored_resume.clone())
        })
        .await?;

    Ok(Json(TailorResumeResponse {
        session_id,
        tailored_resume,
    }))
}
