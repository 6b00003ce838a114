//! Career advice on top of a match: skill-gap analysis and cover-letter tips.
//!
//! Both answers prefer the LLM and fall back to templated text when it is
//! absent or fails, so neither ever errors because of the AI service.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::TextGenerator;
use crate::matching::prompts::{build_cover_letter_prompt, build_skill_gap_prompt};

const MAX_PRIORITY_SKILLS: usize = 5;

/// The parts of a job listing advice needs. Full `JobListing` JSON decodes
/// into this too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGapAnalysis {
    pub missing_skills: Vec<String>,
    pub priority_skills: Vec<String>,
    pub recommendations: String,
    pub ai_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverLetterTips {
    pub tips: String,
    pub ai_generated: bool,
}

/// Requirements the resume lacks, in first-seen order with the job's casing,
/// and the ones required by the most jobs (ties by first appearance).
pub fn skill_gaps(resume_skills: &[String], jobs: &[TargetJob]) -> (Vec<String>, Vec<String>) {
    let have: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let mut missing: Vec<String> = Vec::new();
    let mut demand: HashMap<String, usize> = HashMap::new();

    for job in jobs {
        let mut counted: HashSet<String> = HashSet::new();
        for requirement in &job.requirements {
            let key = requirement.to_lowercase();
            if have.contains(&key) || !counted.insert(key.clone()) {
                continue;
            }
            let count = demand.entry(key).or_insert(0);
            if *count == 0 {
                missing.push(requirement.clone());
            }
            *count += 1;
        }
    }

    let mut priority = missing.clone();
    priority.sort_by_key(|skill| std::cmp::Reverse(demand[&skill.to_lowercase()]));
    priority.truncate(MAX_PRIORITY_SKILLS);

    (missing, priority)
}

pub async fn analyze_skill_gaps(
    llm: Option<&dyn TextGenerator>,
    resume_skills: &[String],
    jobs: &[TargetJob],
) -> SkillGapAnalysis {
    let (missing_skills, priority_skills) = skill_gaps(resume_skills, jobs);

    let ai_text = match llm {
        Some(llm) => match llm.generate(&build_skill_gap_prompt(resume_skills, &missing_skills)).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Skill-gap recommendations from LLM failed, using template: {e}");
                None
            }
        },
        None => None,
    };

    let ai_generated = ai_text.is_some();
    let recommendations =
        ai_text.unwrap_or_else(|| templated_recommendations(&priority_skills));

    SkillGapAnalysis {
        missing_skills,
        priority_skills,
        recommendations,
        ai_generated,
    }
}

fn templated_recommendations(priority: &[String]) -> String {
    match priority.first() {
        None => "Your skills already cover the requirements of the selected jobs. \
                 Deepen them with larger projects to stand out."
            .to_string(),
        Some(first) => format!(
            "Priority skills to learn: {}. Start with {first}, which the most target jobs require, \
             and build a small project with it before moving to the next.",
            priority.join(", ")
        ),
    }
}

pub async fn cover_letter_tips(
    llm: Option<&dyn TextGenerator>,
    resume_skills: &[String],
    experience_years: u32,
    job: &TargetJob,
) -> CoverLetterTips {
    if let Some(llm) = llm {
        let prompt = build_cover_letter_prompt(
            resume_skills,
            experience_years,
            &job.title,
            &job.company,
            &job.requirements,
        );
        match llm.generate(&prompt).await {
            Ok(tips) => return CoverLetterTips { tips, ai_generated: true },
            Err(e) => warn!("Cover-letter tips from LLM failed, using template: {e}"),
        }
    }

    CoverLetterTips {
        tips: templated_tips(resume_skills, experience_years, job),
        ai_generated: false,
    }
}

fn templated_tips(resume_skills: &[String], experience_years: u32, job: &TargetJob) -> String {
    let have: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let (matching, missing): (Vec<&String>, Vec<&String>) = job
        .requirements
        .iter()
        .partition(|r| have.contains(&r.to_lowercase()));
    let mut tips = vec![format!(
        "Open by naming the {} role at {} and what draws you to the team.",
        job.title, job.company
    )];

    if matching.is_empty() {
        tips.push(
            "Connect your strongest skills to the problems this role solves, with one concrete example."
                .to_string(),
        );
    } else {
        tips.push(format!(
            "Lead with hands-on examples of {}, which the listing asks for.",
            join_refs(&matching)
        ));
    }

    if experience_years > 0 {
        tips.push(format!(
            "Quantify the outcomes of your {experience_years} years of experience with numbers."
        ));
    } else {
        tips.push("Highlight projects, internships or coursework that show you can deliver.".to_string());
    }

    if !missing.is_empty() {
        tips.push(format!(
            "Mention that you are actively learning {} and how you pick up new tools quickly.",
            join_refs(&missing)
        ));
    }

    tips.iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {tip}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_refs(skills: &[&String]) -> String {
    skills.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}
