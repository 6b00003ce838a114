mod config;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod pipeline;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::JobAggregator;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::matching::{GeminiRanker, MatchRanker, RankingService};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; bad numeric values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.environment);

    // Initialize LLM client (optional)
    let llm: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.http_timeout())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set; ranking uses skill-overlap scoring");
            None
        }
    };

    let ranking_service: Option<Arc<dyn RankingService>> = llm
        .clone()
        .map(|llm| Arc::new(GeminiRanker::new(llm)) as Arc<dyn RankingService>);

    // Initialize job providers
    let aggregator = JobAggregator::from_config(&config)?;
    info!("Job providers configured: {:?}", aggregator.configured_sources());

    // Build app state
    let state = AppState {
        config: Arc::new(config.clone()),
        aggregator: Arc::new(aggregator),
        ranker: Arc::new(MatchRanker::new(ranking_service)),
        llm,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
