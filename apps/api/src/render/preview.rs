use serde::Deserialize;

use crate::models::resume::PageSize;
use crate::render::styles::page_box;

/// How a preview document is framed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    /// Live editor view with page-break guides and hover affordances.
    #[default]
    Interactive,
    /// Fixed page frame with no decorations, used for print and capture.
    #[serde(alias = "export_frame")]
    Export,
}

/// Extra rules appended after the template stylesheet for the given mode.
pub fn decorations(mode: PreviewMode, size: PageSize) -> String {
    let (width, height) = page_box(size);
    match mode {
        PreviewMode::Interactive => format!(
            "body{{background:#f3f4f6;padding:40px 0}}\
.resume-page{{box-shadow:0 12px 40px rgba(15,23,42,0.08);border-radius:16px;position:relative;\
background-image:repeating-linear-gradient(to bottom,transparent 0,transparent {guide}px,rgba(239,68,68,0.45) {guide}px,rgba(239,68,68,0.45) {height}px)}}\
.section{{transition:outline-color .15s}}\
.section:hover{{outline:1px dashed var(--accent-color);outline-offset:6px;cursor:pointer}}",
            guide = height - 1,
        ),
        PreviewMode::Export => format!(
            "body{{background:#fff}}\
.resume-page{{width:{width}px;box-shadow:none;border-radius:0;overflow:hidden}}\
@media print{{.resume-page{{width:auto;min-height:0}}}}"
        ),
    }
}
