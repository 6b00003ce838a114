//! Resume field parsing: derives a `ResumeProfile` from plain text with
//! substring vocabularies and a handful of regexes. Pure; no I/O.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::models::resume::ResumeProfile;
use crate::resume::vocabulary::{
    is_all_uppercase, title_case, EDUCATION_KEYWORDS, SKILLS, SKILL_ALIASES, SUMMARY_MARKERS,
};

const SUMMARY_MAX_CHARS: usize = 500;

static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:skills?|technolog(?:y|ies)|programming languages?|tools?|frameworks?)[:\s]*([^.]+)",
    )
    .expect("valid regex")
});

static FRAGMENT_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|•\n\r]").expect("valid regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// Tried in order; the first pattern with any match wins.
static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+?1?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
        r"\+?[1-9][0-9]{7,14}",
        r"\+?[1-9]?[0-9]{7,14}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static EXPERIENCE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
        r"(\d+)\+?\s*yrs?\s*(?:of\s*)?experience",
        r"experience[:\s]*(\d+)\+?\s*years?",
        r"(\d+)\+?\s*years?\s*in\s*(?:software|programming|development)",
        r"over\s*(\d+)\s*years?",
        r"more\s*than\s*(\d+)\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Parses raw resume text into a `ResumeProfile`.
pub fn parse_resume(text: &str) -> ResumeProfile {
    let text_lower = text.to_lowercase();

    let profile = ResumeProfile {
        full_text: text.to_string(),
        summary: extract_summary(text),
        skills: extract_skills(&text_lower),
        experience_years: extract_experience_years(&text_lower),
        email: extract_email(text),
        phone: extract_phone(text),
        education: extract_education(&text_lower),
        word_count: text.split_whitespace().count(),
    };

    info!(
        "Parsed resume: {} skills, {} years experience, {} words",
        profile.skills.len(),
        profile.experience_years,
        profile.word_count
    );
    profile
}

/// Vocabulary hits, alias hits, and vocabulary hits inside skill-like sections.
/// Expects lower-cased text.
pub fn extract_skills(text_lower: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for skill in SKILLS {
        if text_lower.contains(skill) {
            found.insert(title_case(skill));
        }
    }

    for (alias, canonical) in SKILL_ALIASES {
        if text_lower.contains(alias) {
            found.insert(title_case(canonical));
        }
    }

    for caps in SECTION_RE.captures_iter(text_lower) {
        let Some(section) = caps.get(1) else { continue };
        for fragment in FRAGMENT_SPLIT_RE.split(section.as_str()) {
            let fragment = fragment.trim();
            if fragment.chars().count() <= 1 {
                continue;
            }
            for skill in SKILLS {
                if fragment.contains(skill) {
                    found.insert(title_case(skill));
                }
            }
        }
    }

    found
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// Largest year count mentioned next to an experience phrase, or 0.
/// Expects lower-cased text.
pub fn extract_experience_years(text_lower: &str) -> u32 {
    EXPERIENCE_RES
        .iter()
        .flat_map(|re| re.captures_iter(text_lower))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Expects lower-cased text.
pub fn extract_education(text_lower: &str) -> BTreeSet<String> {
    EDUCATION_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .map(|keyword| title_case(keyword))
        .collect()
}

/// Lines following the first summary-like heading; otherwise the first
/// meaningful lines of the document.
pub fn extract_summary(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut summary = String::new();

    if let Some(heading) = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        SUMMARY_MARKERS.iter().any(|marker| lower.contains(marker))
    }) {
        for line in lines.iter().skip(heading + 1).take(5) {
            if !is_all_uppercase(line) {
                summary.push_str(line);
                summary.push(' ');
            }
        }
    }

    if summary.is_empty() {
        let meaningful: Vec<&str> = lines
            .iter()
            .take(10)
            .filter(|line| line.chars().count() > 20 && !is_all_uppercase(line))
            .take(3)
            .copied()
            .collect();
        summary = meaningful.join(" ");
    }

    summary.trim().chars().take(SUMMARY_MAX_CHARS).collect()
}
