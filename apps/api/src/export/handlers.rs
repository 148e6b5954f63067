//! Axum route handlers for the Export API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::categorizer::categorize_skills;
use crate::export::{ExportArtifact, ExportRequest};
use crate::templates::skills::SkillRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub categories: Vec<SkillRow>,
    pub backend: &'static str,
}

fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/export/pdf
///
/// Renders the résumé through the headless renderer. A 503 with
/// `RENDERER_UNAVAILABLE` tells the client to fall back to browser printing.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let artifact = state.exporter.export_as_pdf(&request).await?;
    Ok(attachment(artifact))
}

/// POST /api/v1/export/docx
pub async fn handle_export_docx(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let artifact = state.exporter.export_as_docx(&request).await?;
    Ok(attachment(artifact))
}

/// POST /api/v1/preview
///
/// Returns a self-contained HTML document. `mode: "export"` gives the fixed
/// print frame; the default is the interactive editor view.
pub async fn handle_preview(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Json(request) = payload?;
    let html = state.exporter.render_preview(&request).await?;
    Ok(Html(html))
}

/// POST /api/v1/skills/categorize
///
/// Unlike the template path, a failed collaborator call is reported (502) so
/// the client can decide to use its own fallback.
pub async fn handle_categorize_skills(
    State(state): State<AppState>,
    payload: Result<Json<CategorizeRequest>, JsonRejection>,
) -> Result<Json<CategorizeResponse>, AppError> {
    let Json(request) = payload?;
    let categorizer = state.exporter.categorizer();
    let skills: Vec<String> = request
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let categories = if skills.is_empty() {
        Vec::new()
    } else {
        categorize_skills(
            categorizer,
            &skills,
            state.exporter.settings().categorize_timeout,
        )
        .await?
        .into_rows()
    };

    Ok(Json(CategorizeResponse {
        categories,
        backend: categorizer.backend(),
    }))
}
