//! Axum route handlers for resume matching.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::{market_overview, MarketOverview};
use crate::models::matching::MatchResponse;
use crate::pipeline::degraded::degraded_response;
use crate::pipeline::intake::{persist_upload, read_upload};
use crate::pipeline::run_pipeline;
use crate::state::AppState;

/// POST /api/v1/match-resume
///
/// Multipart upload in the `file` field. Client errors (bad format, empty or
/// oversized file, unreadable document) are returned as errors; anything
/// unexpected is logged and answered with the degraded example payload.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("match_resume", %request_id);

    async move {
        let result: Result<MatchResponse, AppError> = async {
            let (file_name, data) = read_upload(&mut multipart).await?;
            let upload = persist_upload(&file_name, &data, state.config.max_upload_bytes)?;
            run_pipeline(
                &upload,
                &state.aggregator,
                &state.ranker,
                state.config.job_fetch_limit,
            )
            .await
        }
        .await;

        mask_internal_failure(result).map(Json)
    }
    .instrument(span)
    .await
}

/// Passes results and client errors through; an internal failure becomes the
/// degraded example payload.
fn mask_internal_failure(
    result: Result<MatchResponse, AppError>,
) -> Result<MatchResponse, AppError> {
    match result {
        Ok(response) => {
            info!("Responding with {} matches", response.matches.len());
            Ok(response)
        }
        Err(e) if e.is_client_error() => Err(e),
        Err(e) => {
            error!("Match pipeline failed, serving degraded response: {e:?}");
            Ok(degraded_response())
        }
    }
}

/// GET /api/v1/market-insights
pub async fn handle_market_insights() -> Json<MarketOverview> {
    Json(market_overview())
}
