//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::analyzer::MatchResult;
use crate::matching::display::MatchDisplay;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_text: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub analysis: MatchResult,
    pub display: MatchDisplay,
}

/// POST /api/v1/analyze
///
/// Scores the resume against the job description and records the result on the session.
/// Both texts must be present; the analyzer itself accepts anything.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let analysis = state
        .analyzer
        .analyze(&request.resume_text, &request.job_text);
    let display = MatchDisplay::from_result(&analysis);
    info!(
        "Match score {}/100 ({} overlapping, {} missing)",
        analysis.score,
        analysis.overlap.len(),
        analysis.missing.len()
    );

    let session_id = state
        .sessions
        .update(request.session_id, |s| s.analysis = Some(analysis.clone()))
        .await?;

    Ok(Json(AnalyzeResponse {
        session_id,
        analysis,
        display,
    }))
}
