use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::recommend::engine::Recommender;
use crate::store::FilterOptions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    /// `None` when GEMINI_API_KEY is unset; AI endpoints degrade gracefully.
    pub llm: Option<GeminiClient>,
    /// Computed once at startup; the profile collection never changes.
    pub options: Arc<FilterOptions>,
    #[allow(dead_code)]
    pub config: Config,
}
