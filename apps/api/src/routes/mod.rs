pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers as advice;
use crate::pipeline::handlers as matching;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/match-resume", post(matching::handle_match_resume))
        .route(
            "/api/v1/market-insights",
            get(matching::handle_market_insights),
        )
        .route("/api/v1/skill-gaps", post(advice::handle_skill_gaps))
        .route(
            "/api/v1/cover-letter-tips",
            post(advice::handle_cover_letter_tips),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::jobs::JobAggregator;
    use crate::matching::MatchRanker;

    const BOUNDARY: &str = "jobmatch-test-boundary";

    fn test_state() -> AppState {
        let config = Config::from_lookup(|key| match key {
            "MAX_UPLOAD_BYTES" => Some("1048576".to_string()),
            _ => None,
        })
        .unwrap();
        AppState {
            config: Arc::new(config),
            aggregator: Arc::new(JobAggregator::new(Vec::new(), Duration::ZERO)),
            ranker: Arc::new(MatchRanker::new(None)),
            llm: None,
        }
    }

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/match-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn docx_bytes(lines: &[&str]) -> Vec<u8> {
        let mut doc = docx_rs::Docx::new();
        for line in lines {
            doc = doc.add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*line)));
        }
        let mut buffer = std::io::Cursor::new(Vec::new());
        doc.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_health_reports_configuration_flags() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["gemini_configured"], false);
        assert_eq!(body["adzuna_configured"], false);
        assert_eq!(body["arbeitnow_enabled"], true);
        assert_eq!(body["port"], 8000);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = send(get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["environment"], "production");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_bad_request() {
        let (status, body) = send(multipart_request("file", "resume.txt", b"plain text")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_bad_request() {
        let (status, body) = send(multipart_request("attachment", "resume.pdf", b"%PDF")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_file_is_bad_request() {
        let (status, _) = send(multipart_request("file", "resume.docx", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_unprocessable() {
        let (status, body) = send(multipart_request("file", "resume.pdf", b"definitely not a pdf")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_match_resume_happy_path() {
        let docx = docx_bytes(&["Skills: Python, Docker.", "4 years of experience"]);
        let (status, body) = send(multipart_request("file", "resume.docx", &docx)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["degraded"], false);
        assert_eq!(body["total_jobs_analyzed"], 0);
        let skills = body["resume_skills"].as_array().unwrap();
        assert!(skills.contains(&json!("Docker")));
        assert!(skills.contains(&json!("Python")));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_market_insights() {
        let (status, body) = send(get_request("/api/v1/market-insights")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["popular_skills"][0], "Python");
    }

    #[tokio::test]
    async fn test_skill_gaps_without_ai() {
        let payload = json!({
            "resume_skills": ["Python"],
            "jobs": [
                {"title": "Backend", "requirements": ["Python", "Docker"]},
                {"title": "Platform", "requirements": ["Docker", "Kubernetes"], "remote": true}
            ]
        });
        let (status, body) = send(json_request("/api/v1/skill-gaps", payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing_skills"], json!(["Docker", "Kubernetes"]));
        assert_eq!(body["priority_skills"][0], "Docker");
        assert_eq!(body["ai_generated"], false);
    }

    #[tokio::test]
    async fn test_skill_gaps_requires_jobs() {
        let (status, _) = send(json_request("/api/v1/skill-gaps", json!({"jobs": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cover_letter_tips_templated() {
        let payload = json!({
            "resume_skills": ["React"],
            "experience_years": 2,
            "job": {"title": "Frontend Developer", "company": "Globex", "requirements": ["React"]}
        });
        let (status, body) = send(json_request("/api/v1/cover-letter-tips", payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["tips"].as_str().unwrap().contains("Frontend Developer"));
    }
}
