//! Pieces shared by the five templates: header data and entry projections.
//!
//! Templates differ in placement and styling only; what an entry *says* is
//! decided here so the surfaces cannot drift apart.

use crate::format::{date_range, format_date, split_lines};
use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, SectionId,
};
use crate::sections::{valid_certifications, valid_education, valid_experience, valid_projects};
use crate::templates::{Description, Entry, Header, SectionBlock, SectionBody};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const INLINE_SEPARATOR: &str = " · ";

/// Trimmed value, `None` when blank.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn display_name(info: &PersonalInfo) -> String {
    non_blank(&info.full_name).unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
}

/// Contact items in fixed priority order: email, phone, location, LinkedIn, website.
pub fn contact_line(info: &PersonalInfo) -> Vec<String> {
    [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.website,
    ]
    .into_iter()
    .filter_map(|v| non_blank(v))
    .collect()
}

/// Profession, or the résumé title when no profession is set.
pub fn headline(resume: &ResumeDocument) -> Option<String> {
    non_blank(&resume.personal_info.profession).or_else(|| non_blank(&resume.title))
}

pub fn header(resume: &ResumeDocument, with_headline: bool) -> Header {
    Header {
        name: display_name(&resume.personal_info),
        headline: if with_headline { headline(resume) } else { None },
        contact: contact_line(&resume.personal_info),
        photo: None,
    }
}

pub fn summary_block(resume: &ResumeDocument, title: Option<String>) -> SectionBlock {
    SectionBlock {
        id: SectionId::Summary,
        title,
        body: SectionBody::Text(split_lines(&resume.professional_summary)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry projections
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_entry(exp: &ExperienceEntry, subtitle: Option<String>) -> Entry {
    Entry {
        id: exp.id.clone(),
        title: exp.position.trim().to_string(),
        subtitle,
        dates: date_range(&exp.start_date, &exp.end_date, exp.is_current),
        meta: None,
        description: Description::from_text(&exp.description),
    }
}

/// Experience entries with the company as subtitle.
pub fn experience_entries(resume: &ResumeDocument) -> Vec<Entry> {
    valid_experience(resume)
        .map(|exp| experience_entry(exp, non_blank(&exp.company)))
        .collect()
}

/// `"<degree> in <field>"`, field part omitted when empty.
pub fn education_title(edu: &EducationEntry) -> String {
    match (non_blank(&edu.degree), non_blank(&edu.field)) {
        (Some(degree), Some(field)) => format!("{degree} in {field}"),
        (Some(degree), None) => degree,
        (None, Some(field)) => format!("in {field}"),
        (None, None) => String::new(),
    }
}

pub fn gpa_line(edu: &EducationEntry) -> Option<String> {
    non_blank(&edu.gpa).map(|gpa| format!("GPA: {gpa}"))
}

pub fn education_entries(resume: &ResumeDocument) -> Vec<Entry> {
    valid_education(resume)
        .map(|edu| Entry {
            id: edu.id.clone(),
            title: education_title(edu),
            subtitle: non_blank(&edu.institution),
            dates: non_blank(&format_date(&edu.graduation_date)),
            meta: gpa_line(edu),
            description: Description::None,
        })
        .collect()
}

/// Projects with the type shown as subtitle (`as_meta = false`) or as a meta line.
pub fn project_entries(resume: &ResumeDocument, as_meta: bool) -> Vec<Entry> {
    valid_projects(resume)
        .map(|proj: &ProjectEntry| {
            let kind = non_blank(&proj.kind);
            let (subtitle, meta) = if as_meta { (None, kind) } else { (kind, None) };
            Entry {
                id: proj.id.clone(),
                title: proj.name.trim().to_string(),
                subtitle,
                dates: None,
                meta,
                description: Description::from_text(&proj.description),
            }
        })
        .collect()
}

pub fn certification_entries(resume: &ResumeDocument) -> Vec<Entry> {
    valid_certifications(resume)
        .map(|cert: &CertificationEntry| Entry {
            id: cert.id.clone(),
            title: cert.name.trim().to_string(),
            subtitle: non_blank(&cert.organization),
            dates: non_blank(&format_date(&cert.date)),
            meta: None,
            description: Description::None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_line_priority_order() {
        let info: PersonalInfo = serde_json::from_value(json!({
            "website": "jane.dev",
            "linkedin": "in/jane",
            "location": "Berlin",
            "phone": " ",
            "email": "jane@x.com"
        }))
        .unwrap();
        assert_eq!(contact_line(&info), vec!["jane@x.com", "Berlin", "in/jane", "jane.dev"]);
    }

    #[test]
    fn test_headline_prefers_profession_then_title() {
        let mut resume = ResumeDocument {
            title: "Backend CV".into(),
            ..Default::default()
        };
        assert_eq!(headline(&resume).as_deref(), Some("Backend CV"));
        resume.personal_info.profession = "Platform Engineer".into();
        assert_eq!(headline(&resume).as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_education_title_variants() {
        let edu: EducationEntry =
            serde_json::from_value(json!({ "degree": "BSc", "field": "Physics", "gpa": 3.8 }))
                .unwrap();
        assert_eq!(education_title(&edu), "BSc in Physics");
        assert_eq!(gpa_line(&edu).as_deref(), Some("GPA: 3.8"));

        let edu: EducationEntry =
            serde_json::from_value(json!({ "degree": "MBA", "institution": "INSEAD" })).unwrap();
        assert_eq!(education_title(&edu), "MBA");
        assert_eq!(gpa_line(&edu), None);
    }

    #[test]
    fn test_malformed_dates_render_raw() {
        let resume: ResumeDocument = serde_json::from_value(json!({
            "certifications": [{ "name": "AWS SA", "date": "Spring 2021" }]
        }))
        .unwrap();
        let entries = certification_entries(&resume);
        assert_eq!(entries[0].dates.as_deref(), Some("Spring 2021"));
    }
}
