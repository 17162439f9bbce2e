pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeFile;

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let landing_page = ServeFile::new(static_dir.join("index.html"));
    let interview_page = ServeFile::new(static_dir.join("interview.html"));
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/analyze", post(handlers::handle_analyze))
        .route("/api/follow-up", post(handlers::handle_follow_up))
        .route("/api/evaluate", post(handlers::handle_evaluate))
        // Only the two pages are public; nothing else in the static dir is served
        .route_service("/", landing_page)
        .route_service("/interview.html", interview_page)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::StubGenerator;
    use crate::resume::testing::single_page_pdf;

    const BOUNDARY: &str = "improvyu-test-boundary";

    fn app_with(stub: StubGenerator) -> Router {
        app_with_config(stub, Config::for_tests())
    }

    fn app_with_config(stub: StubGenerator, config: Config) -> Router {
        build_router(AppState {
            llm: Arc::new(stub),
            config,
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app_with(StubGenerator::failing())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    // ── /api/follow-up ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_follow_up_returns_question() {
        let app = app_with(StubGenerator::replying("  What did you measure?\n"));
        let request = json_request(
            "/api/follow-up",
            json!({"history": [{"role": "user", "parts": [{"text": "We cut latency."}]}]}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"question": "What did you measure?"})
        );
    }

    #[tokio::test]
    async fn test_follow_up_passes_marker_through() {
        let app = app_with(StubGenerator::replying("[NEXT_QUESTION]"));
        let request = json_request("/api/follow-up", json!({"history": []}));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            body_json(response).await,
            json!({"question": "[NEXT_QUESTION]"})
        );
    }

    #[tokio::test]
    async fn test_follow_up_model_failure_yields_marker() {
        let app = app_with(StubGenerator::failing());
        let request = json_request(
            "/api/follow-up",
            json!({"history": [{"role": "user", "parts": [{"text": "hi"}]}]}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"question": "[NEXT_QUESTION]"})
        );
    }

    #[tokio::test]
    async fn test_follow_up_missing_history() {
        let app = app_with(StubGenerator::replying("unused"));
        let response = app
            .oneshot(json_request("/api/follow-up", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "Missing history");
    }

    // ── /api/evaluate ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_evaluate_returns_report() {
        let app = app_with(StubGenerator::replying(
            "```json\n{\"overallScore\": 8, \"strengths\": \"s\", \"weaknesses\": \"w\", \"suggestion\": \"x\"}\n```",
        ));
        let response = app
            .oneshot(json_request("/api/evaluate", json!({"answers": ["I did X."]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["overallScore"], 8.0);
        assert_eq!(body["strengths"], "s");
        assert_eq!(body["weaknesses"], "w");
        assert_eq!(body["suggestion"], "x");
    }

    #[tokio::test]
    async fn test_evaluate_empty_answers_returns_empty_object() {
        let app = app_with(StubGenerator::failing());
        let response = app
            .oneshot(json_request("/api/evaluate", json!({"answers": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_evaluate_missing_answers() {
        let app = app_with(StubGenerator::failing());
        let response = app
            .oneshot(json_request("/api/evaluate", json!({"history": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "Missing answers");
    }

    #[tokio::test]
    async fn test_evaluate_incomplete_report_is_bad_gateway() {
        let app = app_with(StubGenerator::replying(
            "```json\n{\"overallScore\":7,\"strengths\":\"...\"}\n```",
        ));
        let response = app
            .oneshot(json_request("/api/evaluate", json!({"answers": ["A"]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "The AI model returned an invalid format for the report."
        );
    }

    // ── /api/analyze ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_analyze_missing_resume_field() {
        let app = app_with(StubGenerator::failing());
        let response = app
            .oneshot(multipart_request("document", "resume.pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "No resume file part"
        );
    }

    #[tokio::test]
    async fn test_analyze_empty_filename() {
        let app = app_with(StubGenerator::failing());
        let response = app
            .oneshot(multipart_request("resume", "", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "No file selected");
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf() {
        let app = app_with(StubGenerator::failing());
        let response = app
            .oneshot(multipart_request("resume", "resume.docx", b"PK\x03\x04"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid file type. Please upload a PDF."
        );
    }

    #[tokio::test]
    async fn test_analyze_unreadable_pdf() {
        let app = app_with(StubGenerator::replying("[\"unused\"]"));
        let response = app
            .oneshot(multipart_request("resume", "resume.pdf", b"not really a pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_returns_questions() {
        let app = app_with(StubGenerator::replying(
            "Here you go:\n```json\n[\"Why Rust?\", \"How did you test it?\"]\n```",
        ));
        let pdf = single_page_pdf("Jane Doe Senior Rust Engineer");
        let response = app
            .oneshot(multipart_request("resume", "resume.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"questions": ["Why Rust?", "How did you test it?"]})
        );
    }

    #[tokio::test]
    async fn test_analyze_prose_reply_is_bad_gateway() {
        let app = app_with(StubGenerator::replying("I cannot answer that."));
        let pdf = single_page_pdf("Jane Doe Senior Rust Engineer");
        let response = app
            .oneshot(multipart_request("resume", "resume.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "The AI model returned an invalid format for questions."
        );
    }

    #[tokio::test]
    async fn test_analyze_oversized_upload_is_payload_too_large() {
        let mut config = Config::for_tests();
        config.max_upload_bytes = 64;
        let app = app_with_config(StubGenerator::failing(), config);

        let response = app
            .oneshot(multipart_request("resume", "resume.pdf", &[b'x'; 4096]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "PAYLOAD_TOO_LARGE"
        );
    }

    // ── JSON body rejections ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_follow_up_non_json_body_uses_error_envelope() {
        let app = app_with(StubGenerator::failing());
        let request = Request::post("/api/follow-up")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("history please"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_follow_up_turn_without_role_uses_error_envelope() {
        let app = app_with(StubGenerator::failing());
        let request = json_request(
            "/api/follow-up",
            json!({"history": [{"parts": [{"text": "hi"}]}]}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_evaluate_missing_content_type_uses_error_envelope() {
        let app = app_with(StubGenerator::failing());
        let request = Request::post("/api/evaluate")
            .body(Body::from(r#"{"answers": []}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    // ── static pages ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_serves_landing_page_from_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Improvyu</h1>").unwrap();
        std::fs::write(dir.path().join("interview.html"), "<h1>Interview</h1>").unwrap();

        let mut config = Config::for_tests();
        config.static_dir = dir.path().to_path_buf();
        let app = app_with_config(StubGenerator::failing(), config);

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/interview.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>Interview</h1>");
    }

    #[tokio::test]
    async fn test_static_dir_does_not_expose_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Improvyu</h1>").unwrap();
        std::fs::write(dir.path().join(".env"), "GOOGLE_API_KEY=secret-key-123").unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();

        let mut config = Config::for_tests();
        config.static_dir = dir.path().to_path_buf();
        let app = app_with_config(StubGenerator::failing(), config);

        for path in ["/.env", "/Cargo.toml", "/index.html/../.env"] {
            let response = app
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(!String::from_utf8_lossy(&bytes).contains("secret-key-123"));
        }
    }
}
