//! Skill categorization: a pluggable, trait-based collaborator for the
//! Technical template.
//!
//! Default: `KeywordSkillCategorizer` (deterministic, no network).
//! With `ANTHROPIC_API_KEY` set: `LlmSkillCategorizer`.
//!
//! Either way, the orchestrator resolves categories before rendering through
//! [`resolve_skill_categories`], which bounds the call with a timeout and
//! falls back to the keyword classifier on any failure.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::export::prompts::categorize_skills_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::templates::skills::{classify_skills, SkillCategories};

#[async_trait]
pub trait SkillCategorizer: Send + Sync {
    /// Returns the raw category → skills mapping. Callers normalize it.
    async fn categorize(&self, skills: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordSkillCategorizer
// ────────────────────────────────────────────────────────────────────────────

pub struct KeywordSkillCategorizer;

#[async_trait]
impl SkillCategorizer for KeywordSkillCategorizer {
    async fn categorize(&self, skills: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
        Ok(classify_skills(skills)
            .into_rows()
            .into_iter()
            .map(|row| (row.category, row.skills))
            .collect())
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSkillCategorizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CategorizeResponse {
    #[serde(default)]
    categories: HashMap<String, Vec<String>>,
}

pub struct LlmSkillCategorizer {
    llm: LlmClient,
}

impl LlmSkillCategorizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillCategorizer for LlmSkillCategorizer {
    async fn categorize(&self, skills: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
        let prompt = categorize_skills_prompt(skills);
        let response: CategorizeResponse = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        Ok(response.categories)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Asks the collaborator within `timeout` and normalizes its answer.
pub async fn categorize_skills(
    categorizer: &dyn SkillCategorizer,
    skills: &[String],
    timeout: Duration,
) -> Result<SkillCategories, LlmError> {
    let mapping = tokio::time::timeout(timeout, categorizer.categorize(skills))
        .await
        .map_err(|_| LlmError::Timeout(timeout))??;
    if mapping.values().all(|list| list.is_empty()) {
        return Err(LlmError::EmptyContent);
    }
    Ok(SkillCategories::normalize(skills, mapping))
}

/// Cache-or-compute step run before the Technical template renders.
///
/// Never fails: timeouts, collaborator errors and empty answers all fall back
/// to [`classify_skills`].
pub async fn resolve_skill_categories(
    categorizer: &dyn SkillCategorizer,
    skills: &[String],
    timeout: Duration,
) -> SkillCategories {
    if skills.iter().all(|s| s.trim().is_empty()) {
        return SkillCategories::default();
    }

    match categorize_skills(categorizer, skills, timeout).await {
        Ok(categories) => {
            debug!(
                backend = categorizer.backend(),
                rows = categories.rows().len(),
                "skills categorized"
            );
            categories
        }
        Err(e) => {
            warn!(
                backend = categorizer.backend(),
                error = %e,
                "skill categorization unavailable, using keyword fallback"
            );
            classify_skills(skills)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(HashMap<String, Vec<String>>);

    #[async_trait]
    impl SkillCategorizer for Fixed {
        async fn categorize(&self, _: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
            Ok(self.0.clone())
        }
        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct Failing;

    #[async_trait]
    impl SkillCategorizer for Failing {
        async fn categorize(&self, _: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
            Err(LlmError::EmptyContent)
        }
        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    struct Slow;

    #[async_trait]
    impl SkillCategorizer for Slow {
        async fn categorize(&self, _: &[String]) -> Result<HashMap<String, Vec<String>>, LlmError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(HashMap::new())
        }
        fn backend(&self) -> &'static str {
            "slow"
        }
    }

    fn skills() -> Vec<String> {
        vec!["React".into(), "Docker".into(), "Postgres".into()]
    }

    #[tokio::test]
    async fn test_collaborator_answer_is_normalized() {
        let mut mapping = HashMap::new();
        mapping.insert("Tools".to_string(), vec!["Docker".to_string(), "Vim".to_string()]);
        let categories =
            resolve_skill_categories(&Fixed(mapping), &skills(), Duration::from_secs(1)).await;
        let rows = categories.rows();
        assert_eq!(rows[0].category, "Tools");
        assert_eq!(rows[0].skills, vec!["Docker"]);
        assert_eq!(rows[1].category, "Other");
        assert_eq!(rows[1].skills, vec!["React", "Postgres"]);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_keywords() {
        let categories = resolve_skill_categories(&Failing, &skills(), Duration::from_secs(1)).await;
        assert_eq!(categories, classify_skills(&skills()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_to_keywords() {
        let categories = resolve_skill_categories(&Slow, &skills(), Duration::from_secs(5)).await;
        assert_eq!(categories, classify_skills(&skills()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_strict_call_reports_timeout() {
        let err = categorize_skills(&Slow, &skills(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_empty_answer_is_an_error() {
        let mut mapping = HashMap::new();
        mapping.insert("Frontend".to_string(), vec![]);
        let err = categorize_skills(&Fixed(mapping), &skills(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_keyword_categorizer_matches_classifier() {
        let categories =
            resolve_skill_categories(&KeywordSkillCategorizer, &skills(), Duration::from_secs(1)).await;
        assert_eq!(categories, classify_skills(&skills()));
    }

    #[tokio::test]
    async fn test_no_skills_skips_collaborator() {
        let categories = resolve_skill_categories(&Slow, &[], Duration::from_secs(5)).await;
        assert!(categories.is_empty());
    }
}
