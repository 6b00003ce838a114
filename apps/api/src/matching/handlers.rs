//! Axum route handlers for the career-advice endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::advisor::{
    analyze_skill_gaps, cover_letter_tips, CoverLetterTips, SkillGapAnalysis, TargetJob,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    #[serde(default)]
    pub resume_skills: Vec<String>,
    pub jobs: Vec<TargetJob>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub experience_years: u32,
    pub job: TargetJob,
}

/// POST /api/v1/skill-gaps
///
/// Skills the target jobs want that the resume lacks, plus a learning plan.
pub async fn handle_skill_gaps(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    if request.jobs.is_empty() {
        return Err(AppError::Validation("jobs cannot be empty".to_string()));
    }

    let analysis =
        analyze_skill_gaps(state.llm.as_deref(), &request.resume_skills, &request.jobs).await;

    Ok(Json(analysis))
}

/// POST /api/v1/cover-letter-tips
pub async fn handle_cover_letter_tips(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterTips>, AppError> {
    if request.job.title.trim().is_empty() {
        return Err(AppError::Validation("job.title cannot be empty".to_string()));
    }

    let tips = cover_letter_tips(
        state.llm.as_deref(),
        &request.resume_skills,
        request.experience_years,
        &request.job,
    )
    .await;

    Ok(Json(tips))
}
