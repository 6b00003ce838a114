use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Job matching API is running",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "environment": state.config.environment,
    }))
}

/// GET /health
/// Status plus which optional integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "gemini_configured": config.ai_configured(),
        "serpapi_configured": config.serpapi_configured(),
        "adzuna_configured": config.adzuna_configured(),
        "jsearch_configured": config.jsearch_configured(),
        "arbeitnow_enabled": config.arbeitnow_enabled,
        "port": config.port,
        "environment": config.environment,
    }))
}
