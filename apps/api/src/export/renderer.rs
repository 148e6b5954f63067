//! Headless PDF rendering collaborator.
//!
//! `AppState` holds an `Arc<dyn PdfRenderer>`. The production backend drives a
//! headless Chromium process; tests swap in an in-memory fake.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::models::resume::PageSettings;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// What the renderer should load.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfSource {
    /// A complete HTML document string.
    Html(String),
    /// An already-rendered preview page.
    Url(String),
}

#[derive(Debug, Clone)]
pub struct PdfRequest {
    pub source: PdfSource,
    pub page: PageSettings,
}

/// Every variant maps to the renderer-unavailable condition at the API edge.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("renderer could not be launched: {0}")]
    Launch(#[source] std::io::Error),

    #[error("renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("renderer exited with status {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("renderer produced no valid PDF")]
    InvalidOutput,

    #[error("renderer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, request: PdfRequest) -> Result<Bytes, RendererError>;
}

// ────────────────────────────────────────────────────────────────────────────
// ChromiumRenderer
// ────────────────────────────────────────────────────────────────────────────

/// Prints pages with `chromium --headless --print-to-pdf`.
///
/// Inline HTML is written to a scratch directory and loaded by `file://` URL.
/// Page size and margins come from the document's `@page` rule, which
/// Chromium honours when printing.
pub struct ChromiumRenderer {
    executable: PathBuf,
    timeout: Duration,
}

impl ChromiumRenderer {
    pub fn new(executable: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            timeout,
        }
    }

    fn command(&self, target: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg("--run-all-compositor-stages-before-draw")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render(&self, request: PdfRequest) -> Result<Bytes, RendererError> {
        let scratch = tempfile::tempdir()?;
        let output = scratch.path().join("resume.pdf");

        let target = match &request.source {
            PdfSource::Html(html) => {
                let input = scratch.path().join("resume.html");
                tokio::fs::write(&input, html).await?;
                format!("file://{}", input.display())
            }
            PdfSource::Url(url) => url.clone(),
        };

        debug!(
            executable = %self.executable.display(),
            %target,
            page = request.page.size.css_name(),
            "launching headless renderer"
        );
        let child = self
            .command(&target, &output)
            .spawn()
            .map_err(RendererError::Launch)?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;
        let out = match result {
            Ok(out) => out?,
            Err(_) => {
                // Dropping the future drops the child, which kills it.
                warn!(timeout = ?self.timeout, "headless renderer timed out");
                return Err(RendererError::Timeout(self.timeout));
            }
        };

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(RendererError::Failed {
                status: out.status.to_string(),
                stderr: stderr.lines().last().unwrap_or_default().to_string(),
            });
        }

        let pdf = match tokio::fs::read(&output).await {
            Ok(pdf) => pdf,
            Err(_) => return Err(RendererError::InvalidOutput),
        };
        if !pdf.starts_with(PDF_MAGIC) {
            return Err(RendererError::InvalidOutput);
        }

        debug!(bytes = pdf.len(), "headless renderer produced PDF");
        Ok(Bytes::from(pdf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PdfRequest {
        PdfRequest {
            source: PdfSource::Html("<!doctype html><p>hi</p>".into()),
            page: PageSettings::default(),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_launch_error() {
        let renderer = ChromiumRenderer::new(
            "/nonexistent/vitae-test-chromium",
            Duration::from_secs(5),
        );
        let err = renderer.render(request()).await.unwrap_err();
        assert!(matches!(err, RendererError::Launch(_)), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_pdf_output_is_rejected() {
        // `true` exits 0 without writing the output file.
        let renderer = ChromiumRenderer::new("true", Duration::from_secs(5));
        let err = renderer.render(request()).await.unwrap_err();
        assert!(matches!(err, RendererError::InvalidOutput), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_process_reports_status() {
        let renderer = ChromiumRenderer::new("false", Duration::from_secs(5));
        let err = renderer.render(request()).await.unwrap_err();
        assert!(matches!(err, RendererError::Failed { .. }), "{err:?}");
    }
}
