//! Deterministic skill-overlap scorer used whenever AI ranking is unavailable.

use std::collections::HashSet;

use crate::models::job::JobListing;
use crate::models::matching::MatchResult;
use crate::models::resume::ResumeProfile;

/// Score given to jobs that list no requirements.
pub const NEUTRAL_SCORE: u8 = 50;
const APPLY_THRESHOLD: u8 = 60;

/// Scores every job by the share of its requirements the resume covers.
/// Output is in input order; the caller sorts.
pub fn fallback_match(profile: &ResumeProfile, jobs: &[JobListing]) -> Vec<MatchResult> {
    let resume_skills: HashSet<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();
    jobs.iter().map(|job| score_job(&resume_skills, job)).collect()
}

fn score_job(resume_skills: &HashSet<String>, job: &JobListing) -> MatchResult {
    let mut requirements: Vec<String> = Vec::new();
    for requirement in &job.requirements {
        let lower = requirement.to_lowercase();
        if !requirements.contains(&lower) {
            requirements.push(lower);
        }
    }

    let (matching, missing): (Vec<String>, Vec<String>) = requirements
        .into_iter()
        .partition(|r| resume_skills.contains(r));

    let total = matching.len() + missing.len();
    let match_percentage = if total == 0 {
        NEUTRAL_SCORE
    } else {
        (100.0 * matching.len() as f64 / total as f64).round() as u8
    };

    MatchResult {
        job: job.clone(),
        match_percentage,
        explanation: format!(
            "Basic skill match analysis. {} skills match job requirements.",
            matching.len()
        ),
        recommendation: if match_percentage > APPLY_THRESHOLD {
            "Consider applying".to_string()
        } else {
            "Develop missing skills first".to_string()
        },
        matching_skills: matching,
        missing_skills: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceLevel, JobSource, MarketInsights};

    fn profile(skills: &[&str]) -> ResumeProfile {
        ResumeProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..ResumeProfile::default()
        }
    }

    fn job(requirements: &[&str]) -> JobListing {
        JobListing {
            id: "adzuna_1".to_string(),
            title: "Developer".to_string(),
            company: "Acme".to_string(),
            location: "India".to_string(),
            salary: "Not disclosed".to_string(),
            description: "No description available".to_string(),
            source: JobSource::Adzuna,
            url: "https://www.adzuna.co.in/".to_string(),
            posted_date: "Recent".to_string(),
            job_type: "Full-time".to_string(),
            remote: false,
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            experience_level: ExperienceLevel::MidLevel,
            market_insights: MarketInsights::default(),
        }
    }

    #[test]
    fn test_half_overlap_scores_fifty() {
        let results = fallback_match(&profile(&["Python", "React"]), &[job(&["Python", "Django"])]);
        let result = &results[0];
        assert_eq!(result.match_percentage, 50);
        assert_eq!(result.matching_skills, vec!["python"]);
        assert_eq!(result.missing_skills, vec!["django"]);
        assert_eq!(result.recommendation, "Develop missing skills first");
        assert_eq!(
            result.explanation,
            "Basic skill match analysis. 1 skills match job requirements."
        );
    }

    #[test]
    fn test_no_requirements_scores_neutral() {
        let results = fallback_match(&profile(&["Python"]), &[job(&[])]);
        assert_eq!(results[0].match_percentage, 50);
        assert!(results[0].matching_skills.is_empty());
        assert!(results[0].missing_skills.is_empty());
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 2 of 3 = 66.67
        let results = fallback_match(&profile(&["Python", "Aws"]), &[job(&["Python", "Aws", "Docker"])]);
        assert_eq!(results[0].match_percentage, 67);
        assert_eq!(results[0].recommendation, "Consider applying");
    }

    #[test]
    fn test_sixty_is_not_enough_to_apply() {
        let results = fallback_match(
            &profile(&["Python", "Java", "Sql"]),
            &[job(&["Python", "Java", "Sql", "Docker", "Git"])],
        );
        assert_eq!(results[0].match_percentage, 60);
        assert_eq!(results[0].recommendation, "Develop missing skills first");
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let results = fallback_match(&profile(&["Node.Js"]), &[job(&["node.js", "Node.js"])]);
        assert_eq!(results[0].match_percentage, 100);
        assert_eq!(results[0].matching_skills, vec!["node.js"]);
    }

    #[test]
    fn test_keeps_input_order() {
        let jobs = vec![job(&["Docker"]), job(&["Python"])];
        let results = fallback_match(&profile(&["Python"]), &jobs);
        assert_eq!(results[0].match_percentage, 0);
        assert_eq!(results[1].match_percentage, 100);
    }
}
