//! Document-packing collaborator: turns a [`DocxDocument`] into `.docx` bytes.

use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;
use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, PageMargin, Paragraph, Run as DocxRun, Table,
    TableCell, TableRow, WidthType,
};
use thiserror::Error;
use tracing::debug;

use crate::render::docx::{Align, DocxBlock, DocxDocument, Run, BULLET, HEADING_SIZE};

const BULLET_INDENT: i32 = 360;
const LABEL_COLUMN: usize = 2400;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to write DOCX archive: {0}")]
    Write(String),

    #[error("page geometry out of range: {0}")]
    Geometry(String),

    #[error("packing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait DocumentPacker: Send + Sync {
    async fn pack(&self, document: DocxDocument) -> Result<Bytes, PackError>;
}

/// Packs with the `docx-rs` writer on the blocking pool.
pub struct DocxRsPacker;

#[async_trait]
impl DocumentPacker for DocxRsPacker {
    async fn pack(&self, document: DocxDocument) -> Result<Bytes, PackError> {
        let bytes = tokio::task::spawn_blocking(move || pack_sync(&document)).await??;
        debug!(bytes = bytes.len(), "packed DOCX");
        Ok(bytes)
    }
}

fn run(run: &Run) -> DocxRun {
    let mut out = DocxRun::new();
    if run.break_before {
        out = out.add_break(BreakType::TextWrapping);
    }
    out = out.add_text(&run.text).size(run.size);
    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    if let Some(color) = &run.color {
        out = out.color(color);
    }
    out
}

fn paragraph(runs: &[Run], align: Align, bullet: bool) -> Paragraph {
    let mut p = Paragraph::new();
    if bullet {
        p = p
            .add_run(DocxRun::new().add_text(BULLET))
            .indent(Some(BULLET_INDENT), None, None, None);
    }
    for r in runs {
        p = p.add_run(run(r));
    }
    match align {
        Align::Center => p.align(AlignmentType::Center),
        Align::Left => p,
    }
}

fn heading(text: &str, color: &str) -> Paragraph {
    Paragraph::new()
        .add_run(
            DocxRun::new()
                .add_text(text)
                .bold()
                .size(HEADING_SIZE)
                .color(color),
        )
        .line_spacing(LineSpacing::new().before(240).after(80))
}

fn table(rows: &[(String, String)]) -> Table {
    let rows = rows
        .iter()
        .map(|(label, value)| {
            TableRow::new(vec![
                TableCell::new()
                    .width(LABEL_COLUMN, WidthType::Dxa)
                    .add_paragraph(Paragraph::new().add_run(DocxRun::new().add_text(label).bold())),
                TableCell::new().add_paragraph(Paragraph::new().add_run(DocxRun::new().add_text(value))),
            ])
        })
        .collect();
    Table::new(rows)
}

/// Builds and zips the document. Synchronous; callers keep it off the runtime.
pub fn pack_sync(document: &DocxDocument) -> Result<Bytes, PackError> {
    let (width, height) = document.page;
    let margin = i32::try_from(document.margin)
        .map_err(|_| PackError::Geometry(format!("margin of {} twips", document.margin)))?;

    let mut docx = Docx::new().page_size(width, height).page_margin(
        PageMargin::new()
            .top(margin)
            .bottom(margin)
            .left(margin)
            .right(margin),
    );

    for block in document.blocks() {
        docx = match block {
            DocxBlock::Heading { text, color } => docx.add_paragraph(heading(text, color)),
            DocxBlock::Paragraph {
                runs,
                align,
                bullet,
            } => docx.add_paragraph(paragraph(runs, *align, *bullet)),
            DocxBlock::Table(rows) => docx.add_table(table(rows)),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| PackError::Write(e.to_string()))?;
    Ok(Bytes::from(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PageSettings, ResumeDocument};
    use crate::render::build_document;
    use crate::sections::resolve_section_order;
    use crate::templates::{RenderContext, TemplateKind};
    use serde_json::json;

    fn document(template: TemplateKind) -> DocxDocument {
        let resume: ResumeDocument = serde_json::from_value(json!({
            "personal_info": { "full_name": "Jane Doe", "email": "jane@x.com" },
            "professional_summary": "One\nTwo",
            "experience": [{ "company": "Acme", "position": "Engineer", "description": "A\nB" }],
            "skills": ["React", "Docker"]
        }))
        .unwrap();
        let order = resolve_section_order(&resume.sections, &resume);
        let layout = template.render(&RenderContext {
            resume: &resume,
            accent: "#3FA9F5",
            order: &order,
            skill_categories: None,
        });
        build_document(&layout, &PageSettings::default())
    }

    #[tokio::test]
    async fn test_packs_zip_archive_for_every_template() {
        for template in TemplateKind::ALL {
            let bytes = DocxRsPacker.pack(document(template)).await.unwrap();
            // DOCX is a zip container.
            assert!(bytes.starts_with(b"PK"), "{template:?}");
            assert!(bytes.len() > 1000);
        }
    }

    #[test]
    fn test_unrepresentable_margin_is_an_error() {
        let mut doc = document(TemplateKind::Classic);
        doc.margin = u32::MAX;
        let err = pack_sync(&doc).unwrap_err();
        assert!(matches!(err, PackError::Geometry(_)), "{err:?}");
    }
}
