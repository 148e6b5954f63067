//! Minimal with image: fixed two-column split.
//!
//! Sidebar holds the photo, contact, education, skills and certifications;
//! the main column holds summary, experience and projects. Placement is
//! decided by section id. The user's order only applies within a column.

use crate::format::format_date;
use crate::models::resume::SectionId;
use crate::sections::{valid_education, valid_skills};
use crate::templates::common::{
    certification_entries, experience_entries, header, non_blank, project_entries,
    summary_block,
};
use crate::templates::{
    Columns, Description, Entry, EntryStyle, Layout, RenderContext, SectionBlock, SectionBody,
    SkillsView, TemplateKind,
};

fn in_sidebar(id: SectionId) -> bool {
    match id {
        SectionId::Education | SectionId::Skills | SectionId::Certifications => true,
        SectionId::Summary | SectionId::Experience | SectionId::Projects => false,
    }
}

fn section(ctx: &RenderContext<'_>, id: SectionId) -> SectionBlock {
    let resume = ctx.resume;
    let title = Some(id.label().to_string());
    let body = match id {
        SectionId::Summary => return summary_block(resume, title),
        SectionId::Experience => SectionBody::Entries {
            style: EntryStyle::Block,
            items: experience_entries(resume),
        },
        SectionId::Projects => SectionBody::Entries {
            style: EntryStyle::Block,
            items: project_entries(resume, true),
        },
        // Sidebar education is condensed to degree, date and institution.
        SectionId::Education => SectionBody::Entries {
            style: EntryStyle::Compact,
            items: valid_education(resume)
                .map(|edu| Entry {
                    id: edu.id.clone(),
                    title: edu.degree.trim().to_string(),
                    subtitle: non_blank(&edu.institution),
                    dates: non_blank(&format_date(&edu.graduation_date)),
                    meta: None,
                    description: Description::None,
                })
                .collect(),
        },
        SectionId::Certifications => SectionBody::Entries {
            style: EntryStyle::Compact,
            items: certification_entries(resume),
        },
        SectionId::Skills => SectionBody::Skills(SkillsView::List(valid_skills(resume))),
    };
    SectionBlock { id, title, body }
}

pub fn render(ctx: &RenderContext<'_>) -> Layout {
    let mut header = header(ctx.resume, false);
    header.photo = ctx
        .resume
        .personal_info
        .image
        .display_src()
        .map(str::to_string);

    let (sidebar, main): (Vec<SectionId>, Vec<SectionId>) =
        ctx.order.iter().copied().partition(|id| in_sidebar(*id));

    Layout {
        template: TemplateKind::MinimalImage,
        accent: ctx.accent.to_string(),
        header,
        columns: Columns::TwoColumn {
            sidebar: sidebar.into_iter().map(|id| section(ctx, id)).collect(),
            main: main.into_iter().map(|id| section(ctx, id)).collect(),
        },
    }
}
