pub mod health;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/resume/extract", post(documents::handle_extract))
        .route("/api/v1/render/pdf", post(documents::handle_render_pdf))
        // Matching
        .route("/api/v1/analyze", post(matching::handle_analyze))
        // Tailoring
        .route("/api/v1/tailor/bullets", post(tailoring::handle_rewrite_bullets))
        .route("/api/v1/tailor/resume", post(tailoring::handle_tailor_resume))
        // Sessions
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::{test_config, Config};
    use crate::documents::render::render_text_pdf;
    use crate::llm_client::TextGenerator;
    use crate::matching::analyzer::MatchAnalyzer;
    use crate::session::SessionStore;
    use crate::tailoring::rewriter::tests::StubGenerator;

    fn app_with(llm: Arc<StubGenerator>) -> (Router, SessionStore) {
        app_with_config(llm, test_config())
    }

    fn app_with_config(llm: Arc<StubGenerator>, config: Config) -> (Router, SessionStore) {
        let sessions = SessionStore::new(16);
        let state = AppState {
            llm: llm as Arc<dyn TextGenerator>,
            analyzer: Arc::new(MatchAnalyzer::default()),
            sessions: sessions.clone(),
            config,
        };
        (build_router(state), sessions)
    }

    fn app() -> Router {
        app_with(Arc::new(StubGenerator::replying("generated text"))).0
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_upload(file_name: &str, content_type: &str, content: &[u8]) -> Request<Body> {
        let boundary = "X-TAILOR-BOUNDARY";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_result_display_and_session() {
        let (app, sessions) = app_with(Arc::new(StubGenerator::replying("unused")));
        let response = app
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({
                    "resume_text": "I know Python and Excel",
                    "job_text": "Python Python SQL SQL SQL Excel"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["analysis"]["score"], 67);
        assert_eq!(body["analysis"]["overlap"], json!(["excel", "python"]));
        assert_eq!(body["analysis"]["missing"], json!(["sql"]));
        assert_eq!(
            body["analysis"]["top_job_keywords"],
            json!({"sql": 3, "python": 2, "excel": 1})
        );
        assert_eq!(body["display"]["missing_chips"], json!(["sql"]));

        let session_id: Uuid = serde_json::from_value(body["session_id"].clone()).unwrap();
        let stored = sessions.get(session_id).await.unwrap();
        assert_eq!(stored.analysis.unwrap().score, 67);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_inputs() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"resume_text": "rust", "job_text": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_stopword_only_job_scores_zero() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"resume_text": "rust", "job_text": "the and of"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["analysis"]["score"], 0);
        assert_eq!(body["analysis"]["top_job_keywords"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({
                    "resume_text": "rust",
                    "job_text": "rust",
                    "session_id": Uuid::new_v4()
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tailor_resume_stores_result_in_session() {
        let llm = Arc::new(StubGenerator::replying("Tailored resume body"));
        let (app, sessions) = app_with(llm.clone());

        let analyzed = app
            .clone()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"resume_text": "python", "job_text": "Python Kafka"}),
            ))
            .await
            .unwrap();
        let session_id = json_body(analyzed).await["session_id"].clone();

        let response = app
            .oneshot(post_json(
                "/api/v1/tailor/resume",
                json!({
                    "resume_text": "python",
                    "job_text": "Python Kafka",
                    "session_id": session_id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["tailored_resume"], "Tailored resume body");
        assert_eq!(body["session_id"], session_id);

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.starts_with("Rewrite this resume to match the job description perfectly:"));
        assert!(prompt.ends_with("kafka"));

        let id: Uuid = serde_json::from_value(session_id).unwrap();
        let stored = sessions.get(id).await.unwrap();
        assert_eq!(stored.tailored_resume.as_deref(), Some("Tailored resume body"));
        assert!(stored.analysis.is_some());
    }

    #[tokio::test]
    async fn test_tailor_resume_hints_come_from_the_requested_job() {
        let llm = Arc::new(StubGenerator::replying("Tailored resume body"));
        let (app, sessions) = app_with(llm.clone());

        let analyzed = app
            .clone()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"resume_text": "python", "job_text": "Python Kafka Cobol"}),
            ))
            .await
            .unwrap();
        let session_id = json_body(analyzed).await["session_id"].clone();

        let response = app
            .oneshot(post_json(
                "/api/v1/tailor/resume",
                json!({
                    "resume_text": "python",
                    "job_text": "Go Terraform",
                    "session_id": session_id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.ends_with("go, terraform"), "{prompt}");
        assert!(!prompt.contains("kafka"));
        assert!(!prompt.contains("cobol"));

        // The earlier analysis is left as it was
        let id: Uuid = serde_json::from_value(session_id).unwrap();
        let stored = sessions.get(id).await.unwrap().analysis.unwrap();
        assert_eq!(stored.missing, vec!["cobol", "kafka"]);
    }

    #[tokio::test]
    async fn test_rewrite_bullets_llm_failure_is_502() {
        let (app, sessions) = app_with(Arc::new(StubGenerator::failing()));
        let response = app
            .oneshot(post_json(
                "/api/v1/tailor/bullets",
                json!({"resume_text": "- wrote code"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_rewrite_bullets_stores_result() {
        let (app, sessions) = app_with(Arc::new(StubGenerator::replying("- Shipped X")));
        let response = app
            .oneshot(post_json(
                "/api/v1/tailor/bullets",
                json!({"resume_text": "- wrote code"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["improved_bullets"], "- Shipped X");

        let id: Uuid = serde_json::from_value(body["session_id"].clone()).unwrap();
        assert_eq!(
            sessions.get(id).await.unwrap().improved_bullets.as_deref(),
            Some("- Shipped X")
        );
    }

    #[tokio::test]
    async fn test_get_session_roundtrip_and_404() {
        let (app, _) = app_with(Arc::new(StubGenerator::replying("unused")));
        let analyzed = app
            .clone()
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"resume_text": "rust", "job_text": "rust go"}),
            ))
            .await
            .unwrap();
        let session_id = json_body(analyzed).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let found = app
            .clone()
            .oneshot(
                Request::get(format!("/api/v1/sessions/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        let body = json_body(found).await;
        assert_eq!(body["analysis"]["score"], 50);
        assert!(body["tailored_resume"].is_null());

        let missing = app
            .oneshot(
                Request::get(format!("/api/v1/sessions/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_pdf_from_text() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/render/pdf",
                json!({"text": "Jane Doe\nRust Engineer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"tailored_resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_pdf_without_text_or_session_is_400() {
        let response = app()
            .oneshot(post_json("/api/v1/render/pdf", json!({"text": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_pdf_session_without_tailored_resume_is_400() {
        let (app, sessions) = app_with(Arc::new(StubGenerator::replying("unused")));
        let id = sessions.update(None, |_| {}).await.unwrap();
        let response = app
            .oneshot(post_json("/api/v1/render/pdf", json!({"session_id": id})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_unreadable_pdf_is_422() {
        let response = app()
            .oneshot(multipart_upload(
                "resume.pdf",
                "application/pdf",
                b"%PDF-1.4 not really",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("paste the resume text"));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf() {
        let response = app()
            .oneshot(multipart_upload("resume.txt", "text/plain", b"hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_returns_text_of_a_real_pdf() {
        let pdf = render_text_pdf("Senior Rust Engineer\nKafka Postgres").unwrap();
        let response = app()
            .oneshot(multipart_upload("resume.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let text = body["resume_text"].as_str().unwrap();
        assert!(text.contains("Senior Rust Engineer"));
        assert!(text.contains("Kafka Postgres"));
        assert_eq!(body["characters"], text.chars().count());
    }

    #[tokio::test]
    async fn test_extract_oversized_upload_is_413() {
        let config = Config {
            max_upload_bytes: 256,
            ..test_config()
        };
        let (app, _) = app_with_config(Arc::new(StubGenerator::replying("unused")), config);
        let response = app
            .oneshot(multipart_upload("resume.pdf", "application/pdf", &[b'x'; 4096]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
