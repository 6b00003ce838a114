use chrono::Utc;

use crate::models::job::{ExperienceLevel, JobListing, JobSource, MarketInsights};
use crate::models::matching::{MatchResponse, MatchResult};

pub const DEGRADED_MESSAGE: &str = "Resume processed successfully (using fallback data)";

/// Canned response served when the pipeline fails unexpectedly. Same shape as
/// a real answer, but flagged `degraded` so callers can tell the difference.
pub fn degraded_response() -> MatchResponse {
    let job = JobListing {
        id: "sample_1".to_string(),
        title: "Software Engineer".to_string(),
        company: "StartupCo".to_string(),
        location: "Remote".to_string(),
        salary: "$70,000 - $110,000".to_string(),
        description: "Join our innovative team building the future of technology".to_string(),
        source: JobSource::Sample,
        url: "https://example.com/apply/fallback".to_string(),
        posted_date: "Recent".to_string(),
        job_type: "Full-time".to_string(),
        remote: true,
        requirements: vec!["Programming".to_string(), "Problem Solving".to_string()],
        experience_level: ExperienceLevel::MidLevel,
        market_insights: MarketInsights::default(),
    };

    MatchResponse {
        success: true,
        resume_summary: "Resume processed with fallback data due to processing limitations"
            .to_string(),
        resume_skills: vec![
            "Software Development".to_string(),
            "Problem Solving".to_string(),
            "Team Collaboration".to_string(),
        ],
        total_jobs_analyzed: 3,
        matches: vec![MatchResult {
            job,
            match_percentage: 85,
            matching_skills: vec!["Problem Solving".to_string()],
            missing_skills: vec!["Programming".to_string()],
            explanation: "Example match shown while live matching is unavailable.".to_string(),
            recommendation: "Try again later for personalised results".to_string(),
        }],
        message: DEGRADED_MESSAGE.to_string(),
        timestamp: Utc::now(),
        degraded: true,
    }
}
