use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::JobListing;

/// A job listing scored against a resume. Serializes flat: the listing's
/// fields sit next to the scoring fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobListing,
    /// 0 – 100
    pub match_percentage: u8,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub explanation: String,
    pub recommendation: String,
}

/// Body returned by `POST /api/v1/match-resume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub success: bool,
    pub resume_summary: String,
    pub resume_skills: Vec<String>,
    pub total_jobs_analyzed: usize,
    pub matches: Vec<MatchResult>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// True when the payload is canned example data rather than real results.
    pub degraded: bool,
}
