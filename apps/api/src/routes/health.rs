use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "vitae",
        "skill_categorizer": state.exporter.categorizer().backend(),
        "llm_enabled": state.config.anthropic_api_key.is_some()
    }))
}
