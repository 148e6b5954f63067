use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_CHROMIUM: &str = "chromium";

/// Application configuration loaded from environment variables.
/// Startup fails if a numeric variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Headless browser used for PDF export.
    pub chromium_path: String,
    pub pdf_render_timeout: Duration,
    /// Absent means skill categorization always uses the keyword fallback.
    pub anthropic_api_key: Option<String>,
    pub skill_categorize_timeout: Duration,
    pub preview_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            chromium_path: non_empty("CHROMIUM_PATH")
                .or_else(|| non_empty("PUPPETEER_EXECUTABLE_PATH"))
                .unwrap_or_else(|| DEFAULT_CHROMIUM.to_string()),
            pdf_render_timeout: seconds(non_empty("PDF_RENDER_TIMEOUT_SECS"), 30)
                .context("PDF_RENDER_TIMEOUT_SECS must be a whole number of seconds")?,
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            skill_categorize_timeout: seconds(non_empty("SKILL_CATEGORIZE_TIMEOUT_SECS"), 5)
                .context("SKILL_CATEGORIZE_TIMEOUT_SECS must be a whole number of seconds")?,
            preview_origin: non_empty("PREVIEW_ORIGIN"),
        })
    }
}

fn seconds(raw: Option<String>, default: u64) -> Result<Duration> {
    let secs = match raw {
        Some(value) => value.trim().parse::<u64>()?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
