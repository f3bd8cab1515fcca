use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::matching::analyzer::MatchAnalyzer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Default: the Groq `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Keyword analyzer built once from config (stopwords, top-N, rounding).
    pub analyzer: Arc<MatchAnalyzer>,
    /// Latest results per client session. In-memory only.
    pub sessions: SessionStore,
    pub config: Config,
}
