//! Shared normalization helpers: sentinels, truncation, requirement scanning,
//! and the post-processing every listing receives.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::Value;

use crate::models::job::{ExperienceLevel, JobListing, MarketInsights};
use crate::resume::vocabulary::title_case;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NOT_DISCLOSED: &str = "Not disclosed";
pub const NO_DESCRIPTION: &str = "No description available";
pub const RECENT: &str = "Recent";
pub const FULL_TIME: &str = "Full-time";

pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const MAX_REQUIREMENTS: usize = 6;

/// Tech skills scanned for in job descriptions, in scan order.
pub const REQUIREMENT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "react", "angular", "node.js",
    "sql", "mysql", "mongodb", "aws", "docker", "kubernetes",
    "spring boot", "django", "flask", "git", "html", "css",
];

const FRESHER_MARKERS: &[&str] = &["fresher", "entry level", "0-1 year"];
const SENIOR_MARKERS: &[&str] = &["senior", "lead", "5+ years"];

pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Non-blank string or the given sentinel.
pub fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Renders a JSON scalar as a string; `None` for null, arrays and objects.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Stable-within-process hash used when a provider gives no id.
pub fn content_hash(parts: &[&str]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    hasher.finish()
}

/// Up to six canonical skills mentioned in the description.
pub fn extract_requirements(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    REQUIREMENT_SKILLS
        .iter()
        .filter(|skill| lower.contains(*skill))
        .take(MAX_REQUIREMENTS)
        .map(|skill| title_case(skill))
        .collect()
}

pub fn mentions_remote(description: &str) -> bool {
    description.to_lowercase().contains("remote")
}

pub fn determine_experience_level(description: &str) -> ExperienceLevel {
    let lower = description.to_lowercase();
    if FRESHER_MARKERS.iter().any(|m| lower.contains(m)) {
        ExperienceLevel::Fresher
    } else if SENIOR_MARKERS.iter().any(|m| lower.contains(m)) {
        ExperienceLevel::Senior
    } else {
        ExperienceLevel::MidLevel
    }
}

/// Fills the computed fields every listing carries regardless of source.
pub fn post_process(listing: &mut JobListing) {
    listing.experience_level = determine_experience_level(&listing.description);
    listing.market_insights = MarketInsights::default();
}
