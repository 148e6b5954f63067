use crate::config::Config;
use crate::export::Exporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the renderer, packer and skill categorizer behind trait objects.
    pub exporter: Exporter,
}
