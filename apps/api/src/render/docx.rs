//! DOCX surface.
//!
//! Builds a plain document object (page geometry, headings, paragraphs,
//! styled runs, one table) from the same [`Layout`] the HTML surface uses.
//! Text stays raw: DOCX runs are not HTML, so nothing here is escaped, and
//! no HTML fragment (`<br/>`, entities, tags) is ever produced.

use crate::format::{docx_hex, page_margin, DEFAULT_MARGIN_TWIPS};
use crate::models::resume::{PageSettings, SectionId};
use crate::templates::{
    Description, Entry, EntryStyle, Layout, SectionBlock, SectionBody, SkillsView,
    TemplateKind,
};

const MUTED: &str = "475569";
pub const BULLET: &str = "• ";

// Run sizes in half-points.
const NAME_SIZE: usize = 36;
const HEADLINE_SIZE: usize = 24;
pub const HEADING_SIZE: usize = 24;
const TITLE_SIZE: usize = 22;
const BODY_SIZE: usize = 20;
const META_SIZE: usize = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Six hex digits, no `#`.
    pub color: Option<String>,
    pub size: usize,
    /// Line break emitted before this run's text.
    pub break_before: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            color: None,
            size: BODY_SIZE,
            break_before: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    fn line_break(mut self) -> Self {
        self.break_before = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocxBlock {
    Heading { text: String, color: String },
    Paragraph { runs: Vec<Run>, align: Align, bullet: bool },
    /// Two-column table: label cell, value cell.
    Table(Vec<(String, String)>),
}

impl DocxBlock {
    fn paragraph(runs: Vec<Run>) -> Self {
        DocxBlock::Paragraph {
            runs,
            align: Align::Left,
            bullet: false,
        }
    }

    fn bullet(text: &str) -> Self {
        DocxBlock::Paragraph {
            runs: vec![Run::plain(text)],
            align: Align::Left,
            bullet: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocxSection {
    pub id: SectionId,
    pub blocks: Vec<DocxBlock>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocxDocument {
    /// Width and height in twips.
    pub page: (u32, u32),
    pub margin: u32,
    pub header: Vec<DocxBlock>,
    pub sections: Vec<DocxSection>,
}

impl DocxDocument {
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    /// Header blocks followed by every section's blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &DocxBlock> {
        self.header
            .iter()
            .chain(self.sections.iter().flat_map(|s| s.blocks.iter()))
    }

    /// All run and cell text, in document order.
    pub fn text(&self) -> Vec<String> {
        let mut out = Vec::new();
        for block in self.blocks() {
            match block {
                DocxBlock::Heading { text, .. } => out.push(text.clone()),
                DocxBlock::Paragraph { runs, .. } => out.extend(runs.iter().map(|r| r.text.clone())),
                DocxBlock::Table(rows) => {
                    for (label, value) in rows {
                        out.push(label.clone());
                        out.push(value.clone());
                    }
                }
            }
        }
        out
    }
}

/// Builds the document object for `layout` on the requested page geometry.
pub fn build_document(layout: &Layout, page: &PageSettings) -> DocxDocument {
    let accent = docx_hex(&layout.accent);
    // Two-column layouts flow sidebar first, matching the HTML source order.
    let blocks: Vec<&SectionBlock> = layout.blocks().collect();

    DocxDocument {
        page: page.size.twips(),
        margin: page_margin(&page.margin, page.size.twips()).unwrap_or(DEFAULT_MARGIN_TWIPS),
        header: header_blocks(layout, &accent),
        sections: blocks
            .into_iter()
            .map(|block| DocxSection {
                id: block.id,
                blocks: section_blocks(block, &accent),
                items: block.item_keys(),
            })
            .collect(),
    }
}

fn header_blocks(layout: &Layout, accent: &str) -> Vec<DocxBlock> {
    let header = &layout.header;
    let align = match layout.template {
        TemplateKind::Classic => Align::Center,
        _ => Align::Left,
    };
    let name = Run::plain(&header.name).bold().size(NAME_SIZE);
    let name = match layout.template {
        TemplateKind::Modern => name.color(accent),
        _ => name,
    };

    let mut blocks = vec![DocxBlock::Paragraph {
        runs: vec![name],
        align,
        bullet: false,
    }];
    if let Some(headline) = &header.headline {
        blocks.push(DocxBlock::Paragraph {
            runs: vec![Run::plain(headline).size(HEADLINE_SIZE).color(MUTED)],
            align,
            bullet: false,
        });
    }
    if !header.contact.is_empty() {
        blocks.push(DocxBlock::Paragraph {
            runs: vec![Run::plain(header.contact.join("  •  ")).size(META_SIZE).color(MUTED)],
            align,
            bullet: false,
        });
    }
    blocks
}

fn section_blocks(block: &SectionBlock, accent: &str) -> Vec<DocxBlock> {
    let mut blocks = Vec::new();
    if let Some(title) = &block.title {
        blocks.push(DocxBlock::Heading {
            text: title.clone(),
            color: accent.to_string(),
        });
    }

    match &block.body {
        SectionBody::Text(lines) => {
            let runs = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let run = Run::plain(line);
                    if i == 0 {
                        run
                    } else {
                        run.line_break()
                    }
                })
                .collect();
            blocks.push(DocxBlock::paragraph(runs));
        }
        SectionBody::Entries { style, items } => {
            for entry in items {
                match style {
                    EntryStyle::Compact => blocks.push(compact_entry(entry)),
                    EntryStyle::Block | EntryStyle::Timeline => {
                        entry_blocks(&mut blocks, entry, accent)
                    }
                }
            }
        }
        SectionBody::Skills(view) => skills_blocks(&mut blocks, view),
    }
    blocks
}

fn compact_entry(entry: &Entry) -> DocxBlock {
    let mut runs = vec![Run::plain(&entry.title).bold()];
    for part in [&entry.subtitle, &entry.dates].into_iter().flatten() {
        runs.push(Run::plain(format!(" · {part}")).color(MUTED));
    }
    DocxBlock::paragraph(runs)
}

fn entry_blocks(blocks: &mut Vec<DocxBlock>, entry: &Entry, accent: &str) {
    let mut title = vec![Run::plain(&entry.title).bold().size(TITLE_SIZE)];
    if let Some(dates) = &entry.dates {
        title.push(Run::plain(format!("    {dates}")).size(META_SIZE).color(MUTED));
    }
    blocks.push(DocxBlock::paragraph(title));

    if let Some(subtitle) = &entry.subtitle {
        blocks.push(DocxBlock::paragraph(vec![Run::plain(subtitle).color(accent)]));
    }
    if let Some(meta) = &entry.meta {
        blocks.push(DocxBlock::paragraph(vec![Run::plain(meta)
            .italic()
            .size(META_SIZE)
            .color(MUTED)]));
    }
    match &entry.description {
        Description::None => {}
        Description::Paragraph(line) => blocks.push(DocxBlock::paragraph(vec![Run::plain(line)])),
        Description::Bullets(lines) => blocks.extend(lines.iter().map(|l| DocxBlock::bullet(l))),
    }
}

fn skills_blocks(blocks: &mut Vec<DocxBlock>, view: &SkillsView) {
    match view {
        SkillsView::Pills(items) | SkillsView::Badges(items) => {
            blocks.push(DocxBlock::paragraph(vec![Run::plain(items.join("  •  "))]));
        }
        SkillsView::Joined { separator, items } => {
            blocks.push(DocxBlock::paragraph(vec![Run::plain(items.join(*separator))]));
        }
        SkillsView::List(items) => blocks.extend(items.iter().map(|s| DocxBlock::bullet(s))),
        SkillsView::Table(rows) => blocks.push(DocxBlock::Table(
            rows.iter()
                .map(|row| (row.category.clone(), row.skills.join(", ")))
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sanitize_color;
    use crate::models::resume::{PageSize, ResumeDocument};
    use crate::render::html::render_document;
    use crate::render::preview::PreviewMode;
    use crate::sections::resolve_section_order;
    use crate::templates::RenderContext;
    use serde_json::json;

    fn layout_for(resume: &ResumeDocument, template: TemplateKind) -> Layout {
        let order = resolve_section_order(&resume.sections, resume);
        let accent = sanitize_color(&resume.accent_color);
        template.render(&RenderContext {
            resume,
            accent: &accent,
            order: &order,
            skill_categories: None,
        })
    }

    fn sample() -> ResumeDocument {
        serde_json::from_value(json!({
            "title": "Jane <Dev>",
            "personal_info": { "full_name": "Jane & <b>Doe</b>", "email": "jane@x.com" },
            "professional_summary": "First line\nSecond & <i>line</i>",
            "experience": [{ "id": "e1", "company": "Acme", "position": "Engineer",
                             "start_date": "2022-01", "is_current": true,
                             "description": "Built X\nShipped Y" }],
            "education": [{ "id": "d1", "degree": "BSc", "institution": "MIT" }],
            "skills": ["React", "Docker", "Postgres"],
            "sections": ["skills", "education", "summary", "experience"],
            "accent_color": "#abc"
        }))
        .unwrap()
    }

    #[test]
    fn test_docx_text_is_never_escaped() {
        let resume = sample();
        for template in TemplateKind::ALL {
            let doc = build_document(&layout_for(&resume, template), &PageSettings::default());
            let text = doc.text().join("\n");
            assert!(text.contains("Jane & <b>Doe</b>"), "{template:?}");
            assert!(text.contains("Second & <i>line</i>"));
            assert!(!text.contains("&amp;"));
            assert!(!text.contains("&lt;"));
            assert!(!text.contains("<br/>"));
        }
    }

    #[test]
    fn test_section_and_item_order_matches_html() {
        let resume = sample();
        for template in TemplateKind::ALL {
            let layout = layout_for(&resume, template);
            let doc = build_document(&layout, &PageSettings::default());
            assert_eq!(doc.section_ids(), layout.section_ids(), "{template:?}");

            let html = render_document(&layout, &PageSettings::default(), PreviewMode::Export, "");
            let positions: Vec<usize> = doc
                .section_ids()
                .iter()
                .map(|id| html.find(&format!("data-section=\"{}\"", id.as_str())).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{template:?}");

            for (section, block) in doc.sections.iter().zip(layout.blocks()) {
                assert_eq!(section.items, block.item_keys());
            }
        }
    }

    #[test]
    fn test_description_lines_become_bullets() {
        let resume = sample();
        let doc = build_document(
            &layout_for(&resume, TemplateKind::Classic),
            &PageSettings::default(),
        );
        let experience = doc
            .sections
            .iter()
            .find(|s| s.id == SectionId::Experience)
            .unwrap();
        let bullets: Vec<&str> = experience
            .blocks
            .iter()
            .filter_map(|b| match b {
                DocxBlock::Paragraph { runs, bullet: true, .. } => Some(runs[0].text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bullets, vec!["Built X", "Shipped Y"]);
        assert!(doc.text().iter().any(|t| t.contains("Jan 2022 - Present")));
    }

    #[test]
    fn test_page_geometry_in_twips() {
        let resume = sample();
        let page = PageSettings {
            size: PageSize::A4,
            margin: "1in".into(),
            padding: None,
        };
        let doc = build_document(&layout_for(&resume, TemplateKind::Minimal), &page);
        assert_eq!(doc.page, (11906, 16838));
        assert_eq!(doc.margin, 1440);

        let page = PageSettings {
            margin: "wide".into(),
            ..PageSettings::default()
        };
        let doc = build_document(&layout_for(&resume, TemplateKind::Minimal), &page);
        assert_eq!(doc.page, (12240, 15840));
        assert_eq!(doc.margin, 720);
    }

    #[test]
    fn test_technical_skills_table_and_accent() {
        let resume = sample();
        let doc = build_document(
            &layout_for(&resume, TemplateKind::Technical),
            &PageSettings::default(),
        );
        let table = doc
            .blocks()
            .find_map(|b| match b {
                DocxBlock::Table(rows) => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            table,
            vec![
                ("Frontend".to_string(), "React".to_string()),
                ("DevOps".to_string(), "Docker".to_string()),
                ("Databases".to_string(), "Postgres".to_string()),
            ]
        );
        let heading_color = doc.blocks().find_map(|b| match b {
            DocxBlock::Heading { color, .. } => Some(color.clone()),
            _ => None,
        });
        assert_eq!(heading_color.as_deref(), Some("AABBCC"));
    }
}
