//! Section registry: content predicates and the shared ordering algorithm.
//!
//! Every rendering surface consumes the order produced by
//! [`resolve_section_order`]; no surface computes its own.

use std::collections::HashSet;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument, SectionId,
    SectionRef,
};

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Per-entry validity
// ────────────────────────────────────────────────────────────────────────────

/// An entry carrying only an id is not content.
pub fn experience_is_content(entry: &ExperienceEntry) -> bool {
    filled(&entry.company) || filled(&entry.position) || filled(&entry.description)
}

pub fn education_is_content(entry: &EducationEntry) -> bool {
    filled(&entry.degree) || filled(&entry.institution)
}

pub fn project_is_content(entry: &ProjectEntry) -> bool {
    filled(&entry.name) || filled(&entry.description)
}

pub fn certification_is_content(entry: &CertificationEntry) -> bool {
    filled(&entry.name) || filled(&entry.organization)
}

// ────────────────────────────────────────────────────────────────────────────
// Filtered views (input order preserved)
// ────────────────────────────────────────────────────────────────────────────

pub fn valid_experience(resume: &ResumeDocument) -> impl Iterator<Item = &ExperienceEntry> {
    resume.experience.iter().filter(|e| experience_is_content(e))
}

pub fn valid_education(resume: &ResumeDocument) -> impl Iterator<Item = &EducationEntry> {
    resume.education.iter().filter(|e| education_is_content(e))
}

pub fn valid_projects(resume: &ResumeDocument) -> impl Iterator<Item = &ProjectEntry> {
    resume.project.iter().filter(|e| project_is_content(e))
}

pub fn valid_certifications(resume: &ResumeDocument) -> impl Iterator<Item = &CertificationEntry> {
    resume.certifications.iter().filter(|e| certification_is_content(e))
}

/// Non-blank skills, trimmed, duplicates kept.
pub fn valid_skills(resume: &ResumeDocument) -> Vec<String> {
    resume
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Registry operations
// ────────────────────────────────────────────────────────────────────────────

/// Whether `section` has anything to render for this résumé.
pub fn section_has_content(section: SectionId, resume: &ResumeDocument) -> bool {
    match section {
        SectionId::Summary => filled(&resume.professional_summary),
        SectionId::Experience => valid_experience(resume).next().is_some(),
        SectionId::Education => valid_education(resume).next().is_some(),
        SectionId::Projects => valid_projects(resume).next().is_some(),
        SectionId::Certifications => valid_certifications(resume).next().is_some(),
        SectionId::Skills => resume.skills.iter().any(|s| filled(s)),
    }
}

/// Resolves the render order.
///
/// 1. Keep the user's stored order, dropping unknown ids and later duplicates.
/// 2. Append missing known sections in canonical order.
/// 3. Drop sections without content.
pub fn resolve_section_order(stored: &[SectionRef], resume: &ResumeDocument) -> Vec<SectionId> {
    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(SectionId::CANONICAL.len());

    let requested = stored.iter().filter_map(|s| SectionId::parse(&s.id));
    for id in requested.chain(SectionId::CANONICAL) {
        if seen.insert(id) {
            order.push(id);
        }
    }

    order.retain(|id| section_has_content(*id, resume));
    order
}
