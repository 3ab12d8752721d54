use std::sync::Arc;

use sqlx::AnyPool;

use crate::llm_client::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: AnyPool,
    /// Gemini in production; tests swap in a scripted generator.
    pub llm: Arc<dyn ContentGenerator>,
}
