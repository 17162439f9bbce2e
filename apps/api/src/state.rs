use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client, built once at start-up. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
