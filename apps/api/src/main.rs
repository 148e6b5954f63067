mod config;
mod errors;
mod export;
mod format;
mod llm_client;
mod models;
mod render;
mod routes;
mod sections;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::categorizer::{KeywordSkillCategorizer, LlmSkillCategorizer, SkillCategorizer};
use crate::export::packer::DocxRsPacker;
use crate::export::renderer::ChromiumRenderer;
use crate::export::{ExportSettings, Exporter};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    let renderer = Arc::new(ChromiumRenderer::new(
        &config.chromium_path,
        config.pdf_render_timeout,
    ));
    info!(
        executable = %config.chromium_path,
        timeout = ?config.pdf_render_timeout,
        "PDF renderer configured"
    );

    // Keyword classifier unless an API key is configured
    let categorizer: Arc<dyn SkillCategorizer> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("failed to build LLM HTTP client")?;
            info!("Skill categorization via LLM (model: {})", llm_client::MODEL);
            Arc::new(LlmSkillCategorizer::new(llm))
        }
        None => {
            info!("Skill categorization via keyword classifier");
            Arc::new(KeywordSkillCategorizer)
        }
    };

    let exporter = Exporter::new(
        renderer,
        Arc::new(DocxRsPacker),
        categorizer,
        ExportSettings {
            categorize_timeout: config.skill_categorize_timeout,
            preview_origin: config.preview_origin.clone(),
        },
    );

    let state = AppState {
        config: config.clone(),
        exporter,
    };

    // The browser editor calls the API from its own origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
