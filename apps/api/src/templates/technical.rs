//! Technical: single column with a categorized skills table.

use crate::models::resume::SectionId;
use crate::sections::valid_skills;
use crate::templates::common::{
    certification_entries, education_entries, experience_entries, header, project_entries,
    summary_block,
};
use crate::templates::skills::classify_skills;
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
            style: EntryStyle::Timeline,
            items: education_entries(resume),
        },
        SectionId::Projects => SectionBody::Entries {
            style: EntryStyle::Timeline,
            items: project_entries(resume, false),
        },
        SectionId::Certifications => SectionBody::Entries {
            style: EntryStyle::Compact,
            items: certification_entries(resume),
        },
        SectionId::Skills => {
            let rows = match ctx.skill_categories {
                Some(categories) if !categories.is_empty() => categories.rows().to_vec(),
                _ => classify_skills(&valid_skills(resume)).into_rows(),
            };
            SectionBody::Skills(SkillsView::Table(rows))
        }
    };
    SectionBlock { id, title, body }
}

pub fn render(ctx: &RenderContext<'_>) -> Layout {
    Layout {
        template: TemplateKind::Technical,
        accent: ctx.accent.to_string(),
        header: header(ctx.resume, false),
        columns: Columns::Single(ctx.order.iter().map(|id| section(ctx, *id)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use crate::templates::skills::{SkillCategories, SkillRow};
    use serde_json::json;
    use std::collections::HashMap;

    fn skills_table(resume: &ResumeDocument, categories: Option<&SkillCategories>) -> Vec<SkillRow> {
        let order = [SectionId::Skills];
        let layout = render(&RenderContext {
            resume,
            accent: "#000000",
            order: &order,
            skill_categories: categories,
        });
        let rows = match &layout.blocks().next().unwrap().body {
            SectionBody::Skills(SkillsView::Table(rows)) => rows.clone(),
            other => panic!("expected skills table, got {other:?}"),
        };
        rows
    }

    #[test]
    fn test_unresolved_categories_use_fallback() {
        let resume: ResumeDocument =
            serde_json::from_value(json!({ "skills": ["React", "Docker", "Postgres"] })).unwrap();
        let rows = skills_table(&resume, None);
        let categories: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Frontend", "DevOps", "Databases"]);
        assert_eq!(rows[0].skills, vec!["React"]);
        assert_eq!(rows[1].skills, vec!["Docker"]);
        assert_eq!(rows[2].skills, vec!["Postgres"]);
    }

    #[test]
    fn test_resolved_categories_are_used_verbatim() {
        let resume: ResumeDocument =
            serde_json::from_value(json!({ "skills": ["React", "Docker"] })).unwrap();
        let mut response = HashMap::new();
        response.insert("Tools".to_string(), vec!["React".to_string(), "Docker".to_string()]);
        let categories = SkillCategories::normalize(&resume.skills, response);

        let rows = skills_table(&resume, Some(&categories));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Tools");
    }
}
