//! Search titles derived from resume skills.

/// Skill keyword → job titles worth searching for.
const SKILL_TO_TITLES: &[(&str, &[&str])] = &[
    ("python", &["Python Developer", "Backend Developer", "Data Scientist"]),
    ("java", &["Java Developer", "Backend Developer", "Full Stack Developer"]),
    ("javascript", &["Frontend Developer", "Full Stack Developer", "Web Developer"]),
    ("react", &["React Developer", "Frontend Developer", "UI Developer"]),
    ("node.js", &["Node.js Developer", "Backend Developer", "Full Stack Developer"]),
    ("data science", &["Data Scientist", "Data Analyst", "ML Engineer"]),
    ("machine learning", &["ML Engineer", "Data Scientist", "AI Engineer"]),
    ("devops", &["DevOps Engineer", "Cloud Engineer", "SRE"]),
    ("aws", &["Cloud Engineer", "DevOps Engineer", "Solutions Architect"]),
];

const DEFAULT_TITLES: &[&str] = &["Software Developer", "Software Engineer"];
const MAX_TITLES: usize = 3;

/// Maps resume skills to at most three search titles.
///
/// A skill matches a table key when either contains the other
/// (case-insensitive). Titles keep first-seen order; duplicates are dropped.
pub fn derive_job_titles(skills: &[String]) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();

    for skill in skills {
        let skill_lower = skill.to_lowercase();
        for (key, mapped) in SKILL_TO_TITLES {
            if key.contains(skill_lower.as_str()) || skill_lower.contains(key) {
                for title in mapped.iter() {
                    if !titles.iter().any(|t| t == title) {
                        titles.push(title.to_string());
                    }
                }
            }
        }
    }

    if titles.is_empty() {
        titles = DEFAULT_TITLES.iter().map(|t| t.to_string()).collect();
    }

    titles.truncate(MAX_TITLES);
    titles
}
