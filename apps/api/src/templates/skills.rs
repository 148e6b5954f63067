//! Skill categories for the Technical template.
//!
//! Categories come from an external categorizer when one answers in time.
//! Otherwise [`classify_skills`] assigns them from fixed keyword sets, which
//! always yields the same rows for the same input.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const OTHER: &str = "Other";

/// Row order in the rendered table. Categories outside this list follow alphabetically.
pub const DISPLAY_ORDER: [&str; 12] = [
    "Frontend",
    "Backend",
    "DevOps",
    "Cloud",
    "Data",
    "Mobile",
    "Testing",
    "Databases",
    "Languages",
    "Frameworks",
    "Tools",
    OTHER,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub category: String,
    pub skills: Vec<String>,
}

/// Ordered, non-empty category rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillCategories {
    rows: Vec<SkillRow>,
}

impl SkillCategories {
    pub fn rows(&self) -> &[SkillRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SkillRow> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Orders buckets by [`DISPLAY_ORDER`], unknown categories alphabetically after.
    fn from_buckets(mut buckets: BTreeMap<String, Vec<String>>) -> Self {
        let mut rows = Vec::with_capacity(buckets.len());
        for category in DISPLAY_ORDER {
            if let Some(skills) = buckets.remove(category) {
                rows.push(SkillRow {
                    category: category.to_string(),
                    skills,
                });
            }
        }
        rows.extend(
            buckets
                .into_iter()
                .map(|(category, skills)| SkillRow { category, skills }),
        );
        rows.retain(|row| !row.skills.is_empty());
        Self { rows }
    }

    /// Reconciles a categorizer response with the input list.
    ///
    /// Skills the response invents are dropped. Input skills it omits land in
    /// `Other`. Duplicate inputs are matched one-for-one, so every input skill
    /// appears exactly as many times as it was given.
    pub fn normalize(input: &[String], response: HashMap<String, Vec<String>>) -> Self {
        let input: Vec<&str> = input
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let mut remaining: HashMap<String, usize> = HashMap::new();
        for skill in &input {
            *remaining.entry(skill.to_lowercase()).or_default() += 1;
        }

        let response: BTreeMap<String, Vec<String>> = response
            .into_iter()
            .map(|(category, skills)| (category.trim().to_string(), skills))
            .filter(|(category, _)| !category.is_empty())
            .collect();

        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let ordered = SkillCategories::from_buckets(response);
        for row in ordered.rows {
            for skill in row.skills {
                let skill = skill.trim();
                let Some(count) = remaining.get_mut(&skill.to_lowercase()) else {
                    continue;
                };
                if *count == 0 {
                    continue;
                }
                *count -= 1;
                // Keep the user's spelling.
                let original = input
                    .iter()
                    .find(|s| s.eq_ignore_ascii_case(skill))
                    .map_or(skill, |s| *s);
                buckets
                    .entry(row.category.clone())
                    .or_default()
                    .push(original.to_string());
            }
        }

        for skill in input {
            if let Some(count) = remaining.get_mut(&skill.to_lowercase()) {
                if *count > 0 {
                    *count -= 1;
                    buckets.entry(OTHER.to_string()).or_default().push(skill.to_string());
                }
            }
        }

        Self::from_buckets(buckets)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic fallback classifier
// ────────────────────────────────────────────────────────────────────────────

/// Keyword sets in check order; the first match wins.
static KEYWORD_SETS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Frontend", r"react|vue|angular|html|css|sass|tailwind|next|nuxt|vite|webpack|typescript|javascript"),
        ("Backend", r"node|express|django|flask|fastapi|spring|rails|laravel|go\b|golang|\.net|kotlin|java|python|ruby|php"),
        ("DevOps", r"docker|kubernetes|terraform|ansible|github actions|circleci|jenkins|helm|argo"),
        ("DevOps", r"aws|gcp|google cloud|azure|cloudfront|lambda|ecs|eks|s3|cloud run|cloud functions"),
        ("Databases", r"postgres|mysql|mariadb|sqlite|oracle|mongodb|dynamo|redis|cassandra|elasticsearch|neo4j"),
        ("Data", r"sql|nosql|pandas|spark|hadoop|kafka|airflow|dbt|etl|ml|machine learning|tensorflow|pytorch|scikit"),
        ("Mobile", r"react native|swift|objective-c|kotlin|android|ios|flutter|dart"),
        ("Testing", r"jest|mocha|chai|pytest|cypress|playwright|selenium|junit|karma|rtl"),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("skill keyword pattern is valid");
        (category, regex)
    })
    .collect()
});

fn classify(skill: &str) -> &'static str {
    KEYWORD_SETS
        .iter()
        .find(|(_, regex)| regex.is_match(skill))
        .map_or(OTHER, |(category, _)| *category)
}

/// Buckets skills by case-insensitive substring match against fixed keyword sets.
/// Unmatched skills go to `Other`. Input order is kept within each row.
pub fn classify_skills(skills: &[String]) -> SkillCategories {
    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for skill in skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        buckets
            .entry(classify(skill).to_string())
            .or_default()
            .push(skill.to_string());
    }
    SkillCategories::from_buckets(buckets)
}
