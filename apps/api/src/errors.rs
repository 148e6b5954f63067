use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::packer::PackError;
use crate::export::renderer::RendererError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(#[from] RendererError),

    #[error("Export failed: {0}")]
    Packing(#[from] PackError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Malformed bodies (bad JSON, wrong shape, missing content type) are
/// validation errors with the usual error envelope.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RendererUnavailable(e) => {
                tracing::warn!("Renderer unavailable: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "RENDERER_UNAVAILABLE",
                    "PDF renderer is unavailable; use the browser print dialog instead".to_string(),
                )
            }
            AppError::Packing(e) => {
                tracing::error!("DOCX packing failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    format!("Export failed: {e}"),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "Skill categorization failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
