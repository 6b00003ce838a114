//! The resume-matching pipeline: extract → parse → fetch jobs → rank.
//!
//! Stages run strictly in sequence for one request. Only extraction can fail;
//! job fetching and ranking degrade instead of erroring.

pub mod degraded;
pub mod handlers;
pub mod intake;

use anyhow::anyhow;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractionError};
use crate::jobs::JobAggregator;
use crate::matching::MatchRanker;
use crate::models::matching::MatchResponse;
use crate::resume::parse_resume;

use intake::UploadedResume;

const DEFAULT_SUMMARY: &str = "Resume processed successfully";

pub async fn run_pipeline(
    upload: &UploadedResume,
    aggregator: &JobAggregator,
    ranker: &MatchRanker,
    job_limit: usize,
) -> Result<MatchResponse, AppError> {
    let path = upload.path().to_path_buf();
    let format = upload.format;
    let text = run_extraction(move || extract_text(&path, format)).await?;

    let profile = parse_resume(&text);
    let skills = profile.skill_list();
    info!("Extracted {} skills from {}", skills.len(), upload.file_name);

    let jobs = aggregator.fetch_jobs(job_limit, &skills).await;
    let matches = ranker.rank(&profile, &jobs).await;
    info!("Generated {} matches from {} jobs", matches.len(), jobs.len());

    let resume_summary = if profile.summary.trim().is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        profile.summary.clone()
    };

    Ok(MatchResponse {
        success: true,
        resume_summary,
        resume_skills: skills,
        total_jobs_analyzed: jobs.len(),
        matches,
        message: "Resume processed successfully".to_string(),
        timestamp: Utc::now(),
        degraded: false,
    })
}

/// Runs an extraction job on the blocking pool. Document errors stay client
/// errors; a job that panics or is cancelled is an internal failure.
pub(crate) async fn run_extraction<F>(job: F) -> Result<String, AppError>
where
    F: FnOnce() -> Result<String, ExtractionError> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => Ok(result?),
        Err(e) => Err(AppError::Internal(anyhow!("extraction task failed: {e}"))),
    }
}
