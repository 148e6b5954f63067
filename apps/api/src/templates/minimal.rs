//! Minimal: no headline, untitled summary, skills on one joined line.

use crate::models::resume::SectionId;
use crate::sections::valid_skills;
use crate::templates::common::{
    certification_entries, education_entries, experience_entries, header, project_entries,
    summary_block, INLINE_SEPARATOR,
};
use crate::templates::{
    Columns, EntryStyle, Layout, RenderContext, SectionBlock, SectionBody, SkillsView,
    TemplateKind,
};

fn section(ctx: &RenderContext<'_>, id: SectionId) -> SectionBlock {
    let resume = ctx.resume;
    let title = Some(id.label().to_string());
    let body = match id {
        SectionId::Summary => return summary_block(resume, None),
        SectionId::Experience => SectionBody::Entries {
            style: EntryStyle::Block,
            items: experience_entries(resume),
        },
        SectionId::Education => SectionBody::Entries {
            style: EntryStyle::Block,
            items: education_entries(resume),
        },
        SectionId::Projects => SectionBody::Entries {
            style: EntryStyle::Block,
            items: project_entries(resume, true),
        },
        SectionId::Certifications => SectionBody::Entries {
            style: EntryStyle::Compact,
            items: certification_entries(resume),
        },
        SectionId::Skills => SectionBody::Skills(SkillsView::Joined {
            separator: INLINE_SEPARATOR,
            items: valid_skills(resume),
        }),
    };
    SectionBlock { id, title, body }
}

pub fn render(ctx: &RenderContext<'_>) -> Layout {
    Layout {
        template: TemplateKind::Minimal,
        accent: ctx.accent.to_string(),
        header: header(ctx.resume, false),
        columns: Columns::Single(ctx.order.iter().map(|id| section(ctx, *id)).collect()),
    }
}
