//! Template engine.
//!
//! Each template is a pure function from a [`RenderContext`] to a [`Layout`]
//! tree. Layout trees carry raw user text; escaping belongs to the HTML
//! surfaces, and the DOCX builder consumes the same tree untouched. Every
//! surface walks the tree in the same order, so the rendered section ids and
//! item ids agree across preview, PDF and DOCX.

pub mod classic;
pub mod common;
pub mod minimal;
pub mod minimal_image;
pub mod modern;
pub mod skills;
pub mod technical;

use serde::{Deserialize, Serialize};

use crate::models::resume::{ResumeDocument, SectionId};
use crate::templates::skills::{SkillCategories, SkillRow};

// ────────────────────────────────────────────────────────────────────────────
// Template kinds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Minimal,
    MinimalImage,
    Technical,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::MinimalImage,
        TemplateKind::Technical,
    ];

    /// Resolves a stored or requested template id. Unknown ids fall back to Classic.
    pub fn resolve(raw: &str) -> Self {
        match raw.trim() {
            "modern" => TemplateKind::Modern,
            "minimal" => TemplateKind::Minimal,
            "minimal-image" => TemplateKind::MinimalImage,
            "technical" => TemplateKind::Technical,
            _ => TemplateKind::Classic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::MinimalImage => "minimal-image",
            TemplateKind::Technical => "technical",
        }
    }

    /// Only the Technical template groups skills into categories.
    pub fn needs_skill_categories(&self) -> bool {
        matches!(self, TemplateKind::Technical)
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Layout {
        match self {
            TemplateKind::Classic => classic::render(ctx),
            TemplateKind::Modern => modern::render(ctx),
            TemplateKind::Minimal => minimal::render(ctx),
            TemplateKind::MinimalImage => minimal_image::render(ctx),
            TemplateKind::Technical => technical::render(ctx),
        }
    }
}

/// Inputs shared by every template. The accent must already be sanitized and
/// the order already resolved.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub resume: &'a ResumeDocument,
    pub accent: &'a str,
    pub order: &'a [SectionId],
    /// Pre-resolved categories for the Technical template. `None` means the
    /// deterministic classifier is used.
    pub skill_categories: Option<&'a SkillCategories>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub template: TemplateKind,
    pub accent: String,
    pub header: Header,
    pub columns: Columns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub headline: Option<String>,
    /// Empty when no contact field is present; the line is then omitted.
    pub contact: Vec<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Columns {
    Single(Vec<SectionBlock>),
    TwoColumn {
        sidebar: Vec<SectionBlock>,
        main: Vec<SectionBlock>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub id: SectionId,
    /// `None` renders the body without a heading.
    pub title: Option<String>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(Vec<String>),
    Entries { style: EntryStyle, items: Vec<Entry> },
    Skills(SkillsView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// Title row with dates, subtitle and description below.
    Block,
    /// Block entries with a marker on the left edge.
    Timeline,
    /// One-line list items (`name · org · date`).
    Compact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub dates: Option<String>,
    pub meta: Option<String>,
    pub description: Description,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    None,
    Paragraph(String),
    Bullets(Vec<String>),
}

impl Description {
    /// One non-empty line is a paragraph; more become bullets.
    pub fn from_text(text: &str) -> Self {
        let mut lines = crate::format::split_lines(text);
        match lines.len() {
            0 => Description::None,
            1 => Description::Paragraph(lines.remove(0)),
            _ => Description::Bullets(lines),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillsView {
    Pills(Vec<String>),
    Badges(Vec<String>),
    Joined { separator: &'static str, items: Vec<String> },
    List(Vec<String>),
    Table(Vec<SkillRow>),
}

impl Layout {
    /// Every block in document order (sidebar before main).
    pub fn blocks(&self) -> impl Iterator<Item = &SectionBlock> {
        let (first, second): (&[SectionBlock], &[SectionBlock]) = match &self.columns {
            Columns::Single(blocks) => (blocks, &[]),
            Columns::TwoColumn { sidebar, main } => (sidebar, main),
        };
        first.iter().chain(second.iter())
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.blocks().map(|b| b.id).collect()
    }
}

impl SectionBlock {
    /// Identity of the rendered items, in display order.
    pub fn item_keys(&self) -> Vec<String> {
        match &self.body {
            SectionBody::Text(lines) => lines.clone(),
            SectionBody::Entries { items, .. } => items.iter().map(|e| e.id.clone()).collect(),
            SectionBody::Skills(view) => match view {
                SkillsView::Pills(items)
                | SkillsView::Badges(items)
                | SkillsView::List(items)
                | SkillsView::Joined { items, .. } => items.clone(),
                SkillsView::Table(rows) => rows.iter().flat_map(|r| r.skills.clone()).collect(),
            },
        }
    }
}
