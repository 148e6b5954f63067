//! Rendering surfaces. All three consume the same [`crate::templates::Layout`]:
//!
//! - `preview`: framing for the live editor view and the fixed export frame
//! - `html`: self-contained HTML document for the PDF engine and preview
//! - `docx`: document object for the DOCX packer

pub mod docx;
pub mod html;
pub mod preview;
pub mod styles;

pub use docx::build_document;
pub use html::render_document;
pub use preview::PreviewMode;
