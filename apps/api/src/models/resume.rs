use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Structured candidate information derived from a resume's plain text.
///
/// `skills` and `education` hold title-cased canonical labels; the ordered set
/// keeps serialization stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub full_text: String,
    /// At most 500 characters.
    pub summary: String,
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: BTreeSet<String>,
    pub word_count: usize,
}

impl ResumeProfile {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills.iter().cloned().collect()
    }
}
