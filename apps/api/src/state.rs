use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobAggregator;
use crate::llm_client::TextGenerator;
use crate::matching::MatchRanker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Arc<JobAggregator>,
    pub ranker: Arc<MatchRanker>,
    /// `None` when `GEMINI_API_KEY` is unset; advice endpoints then use templates.
    pub llm: Option<Arc<dyn TextGenerator>>,
}
