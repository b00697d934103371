pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::render::handlers as render;
use crate::review::handlers as review;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself, so an
/// upload right at the limit still reaches extractor validation.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(review::handle_analyze_upload))
        .route("/api/v1/analyze/text", post(review::handle_analyze_text))
        .route("/api/v1/download/:format", post(render::handle_download))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    const SAMPLE: &str = "Jane Doe\njane@x.com\n\nEXPERIENCE\n• Led team of 5 engineers\n\nREFERENCES\nJohn Smith, 555-1234";
    const BOUNDARY: &str = "resumerocket-test-boundary";

    fn app_with(config: Config) -> Router {
        build_router(AppState::local(config))
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_post(field: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn error_code(body: &Value) -> &str {
        body["error"]["code"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumerocket");
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let response = app()
            .oneshot(json_post("/api/v1/analyze/text", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["score"].as_u64().is_some());
        assert!(body["grade"].is_string());
        assert_eq!(body["lines"].as_array().map(Vec::len), Some(8));
        assert_eq!(body["lines"][4]["role"], "bullet_item");
        assert_eq!(body["lines"][4]["highlight"], "good");
        assert_eq!(body["suggestion_source"], "local");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_empty_text_is_not_an_error() {
        let response = app()
            .oneshot(json_post("/api/v1/analyze/text", json!({ "text": "" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["score"], 0);
        assert!(!body["findings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_text_oversize() {
        let config = Config {
            max_text_bytes: 16,
            ..Config::default()
        };
        let response = app_with(config)
            .oneshot(json_post("/api/v1/analyze/text", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_code(&body_json(response).await), "OVERSIZE_INPUT");
    }

    #[tokio::test]
    async fn test_analyze_upload_txt() {
        let response = app()
            .oneshot(multipart_post("resume", "resume.txt", SAMPLE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["lines"][3]["role"], "section_header");
    }

    #[tokio::test]
    async fn test_analyze_upload_missing_field() {
        let response = app()
            .oneshot(multipart_post("attachment", "resume.txt", SAMPLE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_upload_unsupported_extension() {
        let response = app()
            .oneshot(multipart_post("resume", "resume.rtf", SAMPLE))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_download_txt() {
        let response = app()
            .oneshot(json_post("/api/v1/download/txt", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"resume_"));
        assert!(disposition.ends_with(".txt\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("• Led team of 5 engineers"));
    }

    #[tokio::test]
    async fn test_download_docx() {
        let response = app()
            .oneshot(json_post("/api/v1/download/docx", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_download_pdf() {
        let response = app()
            .oneshot(json_post("/api/v1/download/pdf", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_download_unsupported_format() {
        let response = app()
            .oneshot(json_post("/api/v1/download/rtf", json!({ "text": SAMPLE })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_download_rejects_format_aliases() {
        for format in ["word", "DOCX", "text"] {
            let response = app()
                .oneshot(json_post(
                    &format!("/api/v1/download/{format}"),
                    json!({ "text": SAMPLE }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{format}");
            assert_eq!(error_code(&body_json(response).await), "UNSUPPORTED_FORMAT");
        }
    }

    fn raw_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_download_format_checked_before_body() {
        let response = app()
            .oneshot(raw_post("/api/v1/download/rtf", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "UNSUPPORTED_FORMAT");

        let response = app()
            .oneshot(raw_post("/api/v1/download/pdf", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_download_empty_text() {
        let response = app()
            .oneshot(json_post("/api/v1/download/pdf", json!({ "text": "  \n" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body_json(response).await), "VALIDATION_ERROR");
    }
}
