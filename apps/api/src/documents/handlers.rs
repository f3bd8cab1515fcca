//! Axum route handlers for PDF upload and download.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::documents::extract::{extract_resume_text, EXTRACTION_FAILED_MESSAGE};
use crate::documents::render::{render_text_pdf_blocking, PDF_FILE_NAME};
use crate::errors::AppError;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
    pub characters: usize,
}

#[derive(Debug, Deserialize)]
pub struct RenderPdfRequest {
    pub text: Option<String>,
    pub session_id: Option<Uuid>,
}

/// POST /api/v1/resume/extract
///
/// Accepts a multipart upload with a PDF in the `file` field and returns its text.
/// Extraction is best-effort: unreadable or text-less PDFs ask the user to paste text instead.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let is_pdf = field.content_type() == Some(PDF_MIME)
            || field
                .file_name()
                .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
                .unwrap_or(false);
        if !is_pdf {
            return Err(AppError::Validation(
                "Only PDF uploads are supported".to_string(),
            ));
        }

        let pdf = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;

        let resume_text = extract_resume_text(pdf).await;
        if resume_text.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                EXTRACTION_FAILED_MESSAGE.to_string(),
            ));
        }

        return Ok(Json(ExtractResponse {
            characters: resume_text.chars().count(),
            resume_text,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Oversized bodies keep their 413; every other multipart failure is a client error.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{context}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// POST /api/v1/render/pdf
///
/// Renders `text`, or the session's tailored resume when only `session_id` is given,
/// as a downloadable PDF.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(request): Json<RenderPdfRequest>,
) -> Result<Response, AppError> {
    let text = match (request.text, request.session_id) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some(id)) => state
            .sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?
            .tailored_resume
            .ok_or_else(|| {
                AppError::Validation(format!("Session {id} has no tailored resume yet"))
            })?,
        _ => {
            return Err(AppError::Validation(
                "Provide non-empty text or a session_id with a tailored resume".to_string(),
            ))
        }
    };

    let pdf = render_text_pdf_blocking(text)
        .await
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
