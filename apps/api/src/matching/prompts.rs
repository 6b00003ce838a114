use crate::jobs::normalize::truncate_chars;
use crate::llm_client::prompts::{join_or, JSON_ONLY_INSTRUCTION};
use crate::models::job::JobListing;
use crate::models::resume::ResumeProfile;

/// Jobs beyond this many are left out of the ranking prompt.
pub const MAX_PROMPT_JOBS: usize = 10;
const PROMPT_DESCRIPTION_CHARS: usize = 200;

pub fn build_ranking_prompt(profile: &ResumeProfile, jobs: &[JobListing]) -> String {
    let education: Vec<&str> = profile.education.iter().map(String::as_str).collect();
    let summary = if profile.summary.trim().is_empty() {
        "No summary available"
    } else {
        profile.summary.as_str()
    };

    let mut jobs_section = String::from("JOB LISTINGS:\n");
    for (index, job) in jobs.iter().take(MAX_PROMPT_JOBS).enumerate() {
        jobs_section.push_str(&format!(
            "\nJob {index}:\n\
             - Title: {}\n\
             - Company: {}\n\
             - Requirements: {}\n\
             - Description: {}...\n\
             - Salary: {}\n\
             - Remote: {}\n",
            job.title,
            job.company,
            join_or(&job.requirements, "None listed"),
            truncate_chars(&job.description, PROMPT_DESCRIPTION_CHARS),
            job.salary,
            job.remote,
        ));
    }

    format!(
        r#"You are a professional career counselor and job matching expert. Analyze the following resume and job listings to provide the best job matches.

RESUME ANALYSIS:
- Skills: {skills}
- Experience: {years} years
- Education: {education}
- Summary: {summary}

{jobs_section}
TASK: Score each job from 0 to 100 using these weights:
1. Skills alignment (40%)
2. Experience level match (25%)
3. Industry/role compatibility (20%)
4. Career growth potential (15%)

For each job also list the matching skills, the missing skills the candidate should develop, a 2-3 sentence explanation and a short recommendation.

RESPONSE FORMAT (JSON):
{{
  "matches": [
    {{
      "job_index": 0,
      "match_percentage": 85,
      "matching_skills": ["React", "JavaScript"],
      "missing_skills": ["MongoDB", "Docker"],
      "explanation": "Strong frontend alignment with the listed requirements.",
      "recommendation": "Apply immediately - excellent fit"
    }}
  ]
}}

`job_index` is the number shown after "Job". Analyze ALL jobs provided.
{JSON_ONLY_INSTRUCTION}"#,
        skills = join_or(&profile.skill_list(), "None detected"),
        years = profile.experience_years,
        education = join_or(&education, "Not specified"),
    )
}

pub fn build_skill_gap_prompt(current: &[String], missing: &[String]) -> String {
    format!(
        "Analyze skill gaps and provide learning recommendations.\n\n\
         CURRENT SKILLS: {}\n\
         MISSING SKILLS: {}\n\n\
         Provide:\n\
         1. Top 5 priority skills to learn\n\
         2. Learning path recommendations\n\
         3. Estimated time to acquire each skill\n\n\
         Focus on skills that appear in multiple job listings.",
        join_or(current, "None listed"),
        join_or(missing, "None"),
    )
}

pub fn build_cover_letter_prompt(
    skills: &[String],
    experience_years: u32,
    title: &str,
    company: &str,
    requirements: &[String],
) -> String {
    format!(
        "Generate 3-4 personalized cover letter tips for this job application.\n\n\
         CANDIDATE PROFILE:\n\
         - Skills: {}\n\
         - Experience: {experience_years} years\n\n\
         JOB DETAILS:\n\
         - Title: {title}\n\
         - Company: {company}\n\
         - Requirements: {}\n\n\
         Provide specific, actionable tips for highlighting relevant experience and skills.",
        join_or(skills, "None listed"),
        join_or(requirements, "None listed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{ExperienceLevel, JobSource, MarketInsights};

    fn job(title: &str) -> JobListing {
        JobListing {
            id: format!("test_{title}"),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Pune".to_string(),
            salary: "Not disclosed".to_string(),
            description: "x".repeat(400),
            source: JobSource::Adzuna,
            url: "https://example.com".to_string(),
            posted_date: "Recent".to_string(),
            job_type: "Full-time".to_string(),
            remote: false,
            requirements: vec!["Python".to_string()],
            experience_level: ExperienceLevel::MidLevel,
            market_insights: MarketInsights::default(),
        }
    }

    #[test]
    fn test_ranking_prompt_caps_jobs_and_descriptions() {
        let jobs: Vec<JobListing> = (0..12).map(|i| job(&format!("Role {i}"))).collect();
        let prompt = build_ranking_prompt(&ResumeProfile::default(), &jobs);

        assert!(prompt.contains("Job 9:"));
        assert!(!prompt.contains("Job 10:"));
        assert!(prompt.contains(&format!("{}...", "x".repeat(200))));
        assert!(!prompt.contains(&"x".repeat(201)));
        assert!(prompt.contains("Skills alignment (40%)"));
        assert!(prompt.contains("No summary available"));
    }

    #[test]
    fn test_cover_letter_prompt_mentions_job() {
        let prompt = build_cover_letter_prompt(
            &["Rust".to_string()],
            4,
            "Backend Engineer",
            "Initech",
            &[],
        );
        assert!(prompt.contains("- Title: Backend Engineer"));
        assert!(prompt.contains("- Experience: 4 years"));
        assert!(prompt.contains("- Requirements: None listed"));
    }
}
