pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/v1/export/pdf", post(handlers::handle_export_pdf))
        .route("/api/v1/export/docx", post(handlers::handle_export_docx))
        .route("/api/v1/preview", post(handlers::handle_preview))
        .route(
            "/api/v1/skills/categorize",
            post(handlers::handle_categorize_skills),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::categorizer::{KeywordSkillCategorizer, SkillCategorizer};
    use crate::export::packer::DocxRsPacker;
    use crate::export::renderer::{PdfRenderer, PdfRequest, RendererError};
    use crate::export::{ExportSettings, Exporter};
    use crate::llm_client::LlmError;

    struct StubRenderer {
        available: bool,
    }

    #[async_trait]
    impl PdfRenderer for StubRenderer {
        async fn render(&self, _: PdfRequest) -> Result<Bytes, RendererError> {
            if self.available {
                Ok(Bytes::from_static(b"%PDF-1.7 stub"))
            } else {
                Err(RendererError::Launch(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "chromium",
                )))
            }
        }
    }

    struct DownCategorizer;

    #[async_trait]
    impl SkillCategorizer for DownCategorizer {
        async fn categorize(&self, _: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
            Err(LlmError::Api {
                status: 500,
                message: "overloaded".into(),
            })
        }
        fn backend(&self) -> &'static str {
            "llm"
        }
    }

    fn config() -> Config {
        Config {
            port: 0,
            rust_log: "info".into(),
            chromium_path: "chromium".into(),
            pdf_render_timeout: Duration::from_secs(30),
            anthropic_api_key: None,
            skill_categorize_timeout: Duration::from_secs(1),
            preview_origin: None,
        }
    }

    fn app_with(renderer_available: bool, categorizer: Arc<dyn SkillCategorizer>) -> Router {
        let exporter = Exporter::new(
            Arc::new(StubRenderer {
                available: renderer_available,
            }),
            Arc::new(DocxRsPacker),
            categorizer,
            ExportSettings::default(),
        );
        build_router(AppState {
            config: config(),
            exporter,
        })
    }

    fn app() -> Router {
        app_with(true, Arc::new(KeywordSkillCategorizer))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn resume() -> Value {
        json!({
            "title": "My Resume",
            "personal_info": { "full_name": "Jane Doe", "email": "jane@x.com" },
            "skills": ["React", "Docker", "Postgres"]
        })
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
        assert_eq!(body["service"], "vitae");
        assert_eq!(body["skill_categorizer"], "keyword");
    }

    #[tokio::test]
    async fn test_export_pdf_attachment() {
        let response = app()
            .oneshot(post("/api/v1/export/pdf", json!({ "resume": resume(), "template": "minimal" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"my-resume_minimal.pdf\""
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_pdf_without_resume_is_bad_request() {
        let response = app()
            .oneshot(post("/api/v1/export/pdf", json!({ "resume": null })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Missing required fields: resume object");
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_envelope() {
        let requests = [
            Request::builder()
                .method("POST")
                .uri("/api/v1/export/docx")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/preview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("null"))
                .unwrap(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/export/pdf")
                .body(Body::from(json!({ "resume": resume() }).to_string()))
                .unwrap(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/skills/categorize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("\"React\""))
                .unwrap(),
        ];

        for request in requests {
            let uri = request.uri().to_string();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_partial_resume_with_nulls_still_exports() {
        let response = app()
            .oneshot(post(
                "/api/v1/export/docx",
                json!({
                    "resume": {
                        "personal_info": null,
                        "skills": null,
                        "experience": [null, { "company": "Acme", "is_current": null }],
                        "sections": [null, "experience"]
                    }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_export_pdf_renderer_down_is_503() {
        let response = app_with(false, Arc::new(KeywordSkillCategorizer))
            .oneshot(post("/api/v1/export/pdf", json!({ "resume": resume() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RENDERER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_export_docx_attachment() {
        let response = app()
            .oneshot(post("/api/v1/export/docx", json!({ "resume": resume() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"my-resume_classic.docx\""
        );
        assert!(body_bytes(response).await.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_preview_returns_html() {
        let response = app()
            .oneshot(post("/api/v1/preview", json!({ "resume": resume(), "mode": "export" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert!(html.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_categorize_with_keyword_backend() {
        let response = app()
            .oneshot(post(
                "/api/v1/skills/categorize",
                json!({ "skills": ["React", "Docker", "Postgres", " "] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["backend"], "keyword");
        assert_eq!(
            body["categories"],
            json!([
                { "category": "Frontend", "skills": ["React"] },
                { "category": "DevOps", "skills": ["Docker"] },
                { "category": "Databases", "skills": ["Postgres"] }
            ])
        );
    }

    #[tokio::test]
    async fn test_categorize_collaborator_failure_is_502() {
        let response = app_with(true, Arc::new(DownCategorizer))
            .oneshot(post("/api/v1/skills/categorize", json!({ "skills": ["React"] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_technical_export_survives_categorizer_failure() {
        let response = app_with(true, Arc::new(DownCategorizer))
            .oneshot(post(
                "/api/v1/preview",
                json!({ "resume": resume(), "template": "technical" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert!(html.contains("Databases"));
    }
}
