//! Modern: accent-filled header block, timeline markers on experience.

use crate::models::resume::SectionId;
use crate::sections::valid_skills;
use crate::templates::common::{
    certification_entries, education_entries, experience_entries, header, project_entries,
    summary_block,
};
use crate::templates::{
    Columns, EntryStyle, Layout, RenderContext, SectionBlock, SectionBody, SkillsView,
    TemplateKind,
};

fn section(ctx: &RenderContext<'_>, id: SectionId) -> SectionBlock {
    let resume = ctx.resume;
    let title = Some(id.label().to_string());
    let body = match id {
        SectionId::Summary => return summary_block(resume, title),
        SectionId::Experience => SectionBody::Entries {
            style: EntryStyle::Timeline,
            items: experience_entries(resume),
        },
        SectionId::Education => SectionBody::Entries {
            style: EntryStyle::Block,
            items: education_entries(resume),
        },
        SectionId::Projects => SectionBody::Entries {
            style: EntryStyle::Block,
            items: project_entries(resume, false),
        },
        SectionId::Certifications => SectionBody::Entries {
            style: EntryStyle::Compact,
            items: certification_entries(resume),
        },
        SectionId::Skills => SectionBody::Skills(SkillsView::Badges(valid_skills(resume))),
    };
    SectionBlock { id, title, body }
}

pub fn render(ctx: &RenderContext<'_>) -> Layout {
    Layout {
        template: TemplateKind::Modern,
        accent: ctx.accent.to_string(),
        header: header(ctx.resume, true),
        columns: Columns::Single(ctx.order.iter().map(|id| section(ctx, *id)).collect()),
    }
}
