//! Export orchestration: request parsing, default resolution, and the calls
//! out to the rendering, packing and categorization collaborators.

pub mod categorizer;
pub mod handlers;
pub mod packer;
pub mod prompts;
pub mod renderer;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::format::{sanitize_color, slugify};
use crate::models::resume::{PageSettings, PageSize, ResumeDocument, DEFAULT_MARGIN};
use crate::render::{build_document, render_document, PreviewMode};
use crate::sections::{resolve_section_order, valid_skills};
use crate::templates::{Layout, RenderContext, TemplateKind};

use categorizer::{resolve_skill_categories, SkillCategorizer};
use packer::DocumentPacker;
use renderer::{PdfRenderer, PdfRequest, PdfSource};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const FILENAME_FALLBACK: &str = "resume";
const MISSING_RESUME: &str = "Missing required fields: resume object";

// ────────────────────────────────────────────────────────────────────────────
// Request / artifact types
// ────────────────────────────────────────────────────────────────────────────

/// Body shared by the PDF, DOCX and preview endpoints.
///
/// `resume` stays a raw value until validation so a null or non-object résumé
/// becomes a validation error instead of a generic body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub resume: Option<Value>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default, alias = "accent_color")]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub margin: Option<String>,
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default, alias = "page_size")]
    pub page_size: Option<String>,
    #[serde(default, alias = "preview_url")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub mode: PreviewMode,
}

impl ExportRequest {
    fn page(&self) -> PageSettings {
        let size = match self.page_size.as_deref().map(str::trim) {
            Some(raw) if raw.eq_ignore_ascii_case("a4") => PageSize::A4,
            _ => PageSize::Letter,
        };
        let margin = self
            .margin
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MARGIN)
            .to_string();
        let padding = self
            .padding
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        PageSettings {
            size,
            margin,
            padding,
        }
    }
}

/// A finished download.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub categorize_timeout: Duration,
    /// Only preview URLs under this origin are handed to the renderer.
    pub preview_origin: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            categorize_timeout: Duration::from_secs(5),
            preview_origin: None,
        }
    }
}

/// Everything a surface needs once defaults are resolved.
struct Prepared {
    template: TemplateKind,
    layout: Layout,
    page: PageSettings,
    title: String,
}

/// `<slug>_<template>.<ext>`, with "resume" standing in for a blank title.
pub fn export_filename(title: &str, template: TemplateKind, ext: &str) -> String {
    format!(
        "{}_{}.{}",
        slugify(title, FILENAME_FALLBACK),
        template.as_str(),
        ext
    )
}

fn preview_url_allowed(url: &str, origin: Option<&str>) -> bool {
    let Some(origin) = origin.map(|o| o.trim().trim_end_matches('/')) else {
        return false;
    };
    if origin.is_empty() {
        return false;
    }
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Exporter {
    renderer: Arc<dyn PdfRenderer>,
    packer: Arc<dyn DocumentPacker>,
    categorizer: Arc<dyn SkillCategorizer>,
    settings: ExportSettings,
}

impl Exporter {
    pub fn new(
        renderer: Arc<dyn PdfRenderer>,
        packer: Arc<dyn DocumentPacker>,
        categorizer: Arc<dyn SkillCategorizer>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            renderer,
            packer,
            categorizer,
            settings,
        }
    }

    pub fn categorizer(&self) -> &dyn SkillCategorizer {
        self.categorizer.as_ref()
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Validates the request and resolves template, accent, order and (for
    /// the Technical template) skill categories.
    ///
    /// The deserialized résumé is owned by this call, so edits made elsewhere
    /// while a long export runs can never reach the render.
    async fn prepare(&self, request: &ExportRequest) -> Result<Prepared, AppError> {
        let resume = parse_resume(request.resume.as_ref())?;

        let template = TemplateKind::resolve(
            request
                .template
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(&resume.template),
        );
        let accent = sanitize_color(
            request
                .accent_color
                .as_deref()
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(&resume.accent_color),
        );
        let order = resolve_section_order(&resume.sections, &resume);

        let categories = if template.needs_skill_categories() {
            let skills = valid_skills(&resume);
            Some(
                resolve_skill_categories(
                    self.categorizer.as_ref(),
                    &skills,
                    self.settings.categorize_timeout,
                )
                .await,
            )
        } else {
            None
        };

        let layout = template.render(&RenderContext {
            resume: &resume,
            accent: &accent,
            order: &order,
            skill_categories: categories.as_ref(),
        });

        Ok(Prepared {
            template,
            layout,
            page: request.page(),
            title: resume.title.clone(),
        })
    }

    /// Renders the preview document for the requested mode.
    pub async fn render_preview(&self, request: &ExportRequest) -> Result<String, AppError> {
        let prepared = self.prepare(request).await?;
        Ok(render_document(
            &prepared.layout,
            &prepared.page,
            request.mode,
            &prepared.title,
        ))
    }

    pub async fn export_as_pdf(&self, request: &ExportRequest) -> Result<ExportArtifact, AppError> {
        let prepared = self.prepare(request).await?;
        let filename = export_filename(&prepared.title, prepared.template, "pdf");

        if let Some(url) = request
            .preview_url
            .as_deref()
            .map(str::trim)
            .filter(|u| preview_url_allowed(u, self.settings.preview_origin.as_deref()))
        {
            let attempt = self
                .renderer
                .render(PdfRequest {
                    source: PdfSource::Url(url.to_string()),
                    page: prepared.page.clone(),
                })
                .await;
            match attempt {
                Ok(bytes) => {
                    info!(%filename, bytes = bytes.len(), "exported PDF from preview URL");
                    return Ok(ExportArtifact {
                        bytes,
                        filename,
                        content_type: PDF_CONTENT_TYPE,
                    });
                }
                Err(e) => warn!(error = %e, "preview URL render failed, retrying with inline HTML"),
            }
        }

        let html = render_document(
            &prepared.layout,
            &prepared.page,
            PreviewMode::Export,
            &prepared.title,
        );
        let bytes = self
            .renderer
            .render(PdfRequest {
                source: PdfSource::Html(html),
                page: prepared.page,
            })
            .await?;

        info!(%filename, bytes = bytes.len(), "exported PDF");
        Ok(ExportArtifact {
            bytes,
            filename,
            content_type: PDF_CONTENT_TYPE,
        })
    }

    pub async fn export_as_docx(&self, request: &ExportRequest) -> Result<ExportArtifact, AppError> {
        let prepared = self.prepare(request).await?;
        let filename = export_filename(&prepared.title, prepared.template, "docx");

        let document = build_document(&prepared.layout, &prepared.page);
        let bytes = self.packer.pack(document).await?;

        info!(%filename, bytes = bytes.len(), "exported DOCX");
        Ok(ExportArtifact {
            bytes,
            filename,
            content_type: DOCX_CONTENT_TYPE,
        })
    }
}

fn parse_resume(raw: Option<&Value>) -> Result<ResumeDocument, AppError> {
    match raw {
        Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
            .map_err(|e| AppError::Validation(format!("Invalid resume object: {e}"))),
        _ => Err(AppError::Validation(MISSING_RESUME.to_string())),
    }
}
