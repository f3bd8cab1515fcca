use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionState;
use crate::state::AppState;

/// GET /api/v1/sessions/:id
/// Returns the latest analysis and rewrites recorded for the session.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}
