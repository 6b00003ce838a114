//! Match ranking: AI scoring with a deterministic fallback.
//!
//! `MatchRanker` holds an optional `Arc<dyn RankingService>`. Any error from
//! the service, including its absence, sends the whole request through
//! `fallback_match`; AI and fallback results are never mixed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{parse_json_object, LlmError, TextGenerator};
use crate::matching::fallback::fallback_match;
use crate::matching::prompts::{build_ranking_prompt, MAX_PROMPT_JOBS};
use crate::models::job::JobListing;
use crate::models::matching::MatchResult;
use crate::models::resume::ResumeProfile;

/// Ranked output never exceeds this many matches.
pub const MAX_MATCHES: usize = 10;

#[derive(Debug, Error)]
pub enum RankingServiceError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("could not decode ranking: {0}")]
    Decode(String),

    #[error("job_index {index} out of range for {len} jobs")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("ranking contained no matches")]
    EmptyResponse,

    #[error("AI ranking is not configured")]
    Unavailable,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait RankingService: Send + Sync {
    async fn rank(
        &self,
        profile: &ResumeProfile,
        jobs: &[JobListing],
    ) -> Result<Vec<MatchResult>, RankingServiceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiRanker
// ────────────────────────────────────────────────────────────────────────────

/// Scores up to ten jobs in a single LLM call.
pub struct GeminiRanker {
    llm: Arc<dyn TextGenerator>,
}

impl GeminiRanker {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RankingService for GeminiRanker {
    async fn rank(
        &self,
        profile: &ResumeProfile,
        jobs: &[JobListing],
    ) -> Result<Vec<MatchResult>, RankingServiceError> {
        let considered = &jobs[..jobs.len().min(MAX_PROMPT_JOBS)];
        let prompt = build_ranking_prompt(profile, considered);
        let text = self.llm.generate(&prompt).await?;
        parse_ai_matches(&text, considered)
    }
}

#[derive(Debug, Deserialize)]
struct AiRanking {
    #[serde(default)]
    matches: Vec<AiMatch>,
}

#[derive(Debug, Deserialize)]
struct AiMatch {
    job_index: i64,
    match_percentage: f64,
    #[serde(default)]
    matching_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    recommendation: String,
}

/// Merges the model's scores into copies of the jobs they refer to.
/// One bad index rejects the whole answer.
pub fn parse_ai_matches(
    text: &str,
    jobs: &[JobListing],
) -> Result<Vec<MatchResult>, RankingServiceError> {
    let ranking: AiRanking =
        parse_json_object(text).map_err(|e| RankingServiceError::Decode(e.to_string()))?;

    if ranking.matches.is_empty() {
        return Err(RankingServiceError::EmptyResponse);
    }

    ranking
        .matches
        .into_iter()
        .map(|m| {
            let job = usize::try_from(m.job_index)
                .ok()
                .and_then(|i| jobs.get(i))
                .ok_or(RankingServiceError::IndexOutOfRange {
                    index: m.job_index,
                    len: jobs.len(),
                })?;
            Ok(MatchResult {
                job: job.clone(),
                match_percentage: m.match_percentage.round().clamp(0.0, 100.0) as u8,
                matching_skills: m.matching_skills,
                missing_skills: m.missing_skills,
                explanation: m.explanation,
                recommendation: m.recommendation,
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// MatchRanker
// ────────────────────────────────────────────────────────────────────────────

pub struct MatchRanker {
    ai: Option<Arc<dyn RankingService>>,
}

impl MatchRanker {
    pub fn new(ai: Option<Arc<dyn RankingService>>) -> Self {
        Self { ai }
    }

    /// Best matches first, at most ten. Never fails.
    pub async fn rank(&self, profile: &ResumeProfile, jobs: &[JobListing]) -> Vec<MatchResult> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let mut matches = match self.rank_with_ai(profile, jobs).await {
            Ok(matches) => {
                info!("AI ranked {} jobs", matches.len());
                matches
            }
            Err(RankingServiceError::Unavailable) => {
                debug!("AI ranking not configured, using skill-overlap scoring");
                fallback_match(profile, jobs)
            }
            Err(e) => {
                warn!("AI ranking failed, using skill-overlap scoring: {e}");
                fallback_match(profile, jobs)
            }
        };

        sort_and_truncate(&mut matches);
        matches
    }

    async fn rank_with_ai(
        &self,
        profile: &ResumeProfile,
        jobs: &[JobListing],
    ) -> Result<Vec<MatchResult>, RankingServiceError> {
        let ai = self.ai.as_ref().ok_or(RankingServiceError::Unavailable)?;
        ai.rank(profile, jobs).await
    }
}

/// Stable descending sort by score, then the top ten.
pub fn sort_and_truncate(matches: &mut Vec<MatchResult>) {
    matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    matches.truncate(MAX_MATCHES);
}
