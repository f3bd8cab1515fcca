//! Best-effort text extraction from uploaded PDF resumes.

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

/// Shown to the user whenever an upload yields no text.
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not extract text from the PDF. Please paste the resume text instead.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF could not be parsed: {0}")]
    Parse(String),

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// Extracts the text of every page, concatenated in page order.
pub fn extract_text(pdf: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(pdf).map_err(|e| ExtractError::Parse(e.to_string()))
}

/// Runs extraction on the blocking pool. A panic inside the parser surfaces as `Task`.
pub async fn extract_text_blocking(pdf: Bytes) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&pdf))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))?
}

/// Never fails: any extraction error is logged and yields an empty string.
pub async fn extract_resume_text(pdf: Bytes) -> String {
    let size = pdf.len();
    match extract_text_blocking(pdf).await {
        Ok(text) => {
            info!(
                "Extracted {} characters from {} byte PDF",
                text.chars().count(),
                size
            );
            text
        }
        Err(e) => {
            warn!("PDF text extraction failed for {size} byte upload: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[tokio::test]
    async fn test_lossy_extraction_returns_empty_on_failure() {
        let text = extract_resume_text(Bytes::from_static(b"%PDF-1.4 truncated")).await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_empty_upload_returns_empty() {
        assert!(extract_resume_text(Bytes::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_rendered_pdf_round_trips_to_text() {
        let pdf = crate::documents::render::render_text_pdf("Senior Rust Engineer\nKafka Postgres")
            .unwrap();

        let direct = extract_text(&pdf).unwrap();
        assert!(direct.contains("Senior Rust Engineer"));

        let text = extract_resume_text(Bytes::from(pdf)).await;
        assert!(text.contains("Senior Rust Engineer"));
        assert!(text.contains("Kafka Postgres"));
    }
}
