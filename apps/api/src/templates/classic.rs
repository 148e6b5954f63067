//! Classic: single column, centered header, uppercase section titles.

use crate::models::resume::SectionId;
use crate::sections::{valid_experience, valid_skills};
use crate::templates::common::{
    certification_entries, education_entries, experience_entry, header, non_blank,
    project_entries, summary_block, INLINE_SEPARATOR,
};
use crate::templates::{
    Columns, EntryStyle, Layout, RenderContext, SectionBlock, SectionBody, SkillsView,
    TemplateKind,
};

fn title(id: SectionId) -> Option<String> {
    Some(id.label().to_uppercase())
}

fn section(ctx: &RenderContext<'_>, id: SectionId) -> SectionBlock {
    let resume = ctx.resume;
    let body = match id {
        SectionId::Summary => return summary_block(resume, title(id)),
        SectionId::Experience => SectionBody::Entries {
            style: EntryStyle::Block,
            items: valid_experience(resume)
                .map(|exp| {
                    let subtitle = [&exp.company, &exp.location]
                        .into_iter()
                        .filter_map(|v| non_blank(v))
                        .collect::<Vec<_>>()
                        .join(INLINE_SEPARATOR);
                    experience_entry(exp, non_blank(&subtitle))
                })
                .collect(),
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
        SectionId::Skills => SectionBody::Skills(SkillsView::Pills(valid_skills(resume))),
    };
    SectionBlock {
        id,
        title: title(id),
        body,
    }
}

pub fn render(ctx: &RenderContext<'_>) -> Layout {
    Layout {
        template: TemplateKind::Classic,
        accent: ctx.accent.to_string(),
        header: header(ctx.resume, true),
        columns: Columns::Single(ctx.order.iter().map(|id| section(ctx, *id)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use serde_json::json;

    #[test]
    fn test_classic_titles_uppercase_and_subtitle_joins_location() {
        let resume: ResumeDocument = serde_json::from_value(json!({
            "personal_info": { "full_name": "Jane Doe", "profession": "Engineer" },
            "experience": [{ "company": "Acme", "location": "Berlin", "position": "SRE" }]
        }))
        .unwrap();
        let order = [SectionId::Experience];
        let layout = render(&RenderContext {
            resume: &resume,
            accent: "#000000",
            order: &order,
            skill_categories: None,
        });

        assert_eq!(layout.header.headline.as_deref(), Some("Engineer"));
        let Columns::Single(blocks) = &layout.columns else {
            panic!("classic is single column");
        };
        assert_eq!(blocks[0].title.as_deref(), Some("EXPERIENCE"));
        let SectionBody::Entries { items, .. } = &blocks[0].body else {
            panic!("experience renders entries");
        };
        assert_eq!(items[0].subtitle.as_deref(), Some("Acme · Berlin"));
    }
}
