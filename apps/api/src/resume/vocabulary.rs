//! Closed vocabularies used by the resume parser, plus the title-casing rule
//! that turns a vocabulary term into its canonical label.

/// Known skills, matched as lower-case substrings of the resume text.
pub const SKILLS: &[&str] = &[
    // Programming languages
    "python", "javascript", "java", "c++", "c#", "php", "ruby", "go", "rust", "swift",
    "kotlin", "scala", "r", "matlab", "sql", "typescript", "dart", "objective-c",
    // Web
    "html", "css", "react", "angular", "vue", "svelte", "jquery", "bootstrap",
    "tailwind", "sass", "less", "webpack", "vite", "next.js", "nuxt.js",
    // Backend and APIs
    "node.js", "express", "fastapi", "django", "flask", "spring", "spring boot",
    "asp.net", "laravel", "rails", "gin", "fiber", "rest api", "graphql",
    // Databases
    "mongodb", "mysql", "postgresql", "sqlite", "redis", "elasticsearch",
    "cassandra", "dynamodb", "oracle", "sql server", "firebase",
    // Cloud and DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab ci",
    "github actions", "terraform", "ansible", "chef", "puppet",
    // Data science and AI
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
    "pandas", "numpy", "matplotlib", "seaborn", "jupyter", "tableau", "power bi",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "ionic",
    // Tooling
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "slack",
    "linux", "ubuntu", "windows", "macos", "bash", "powershell",
    // Methodologies
    "agile", "scrum", "kanban", "devops", "ci/cd", "tdd", "bdd",
    "microservices", "api design", "system design",
];

/// Shorthand spellings and the term they resolve to.
pub const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("nodejs", "node.js"),
    ("reactjs", "react"),
    ("angularjs", "angular"),
    ("vuejs", "vue"),
    ("py", "python"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("db", "database"),
    ("api", "rest api"),
    ("ui", "user interface"),
    ("ux", "user experience"),
];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "degree", "diploma",
    "b.tech", "m.tech", "b.sc", "m.sc", "mca", "bca", "mba",
    "university", "college", "institute", "graduation", "undergraduate",
    "postgraduate", "certification", "certificate",
];

/// Line markers that introduce a summary section.
pub const SUMMARY_MARKERS: &[&str] = &["summary", "objective", "profile", "about"];

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `node.js` becomes `Node.Js` and `ci/cd` becomes `Ci/Cd`.
pub fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut in_word = false;
    for c in term.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// True when the line has letters and none of them are lower-case.
pub fn is_all_uppercase(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_splits_on_punctuation() {
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("ci/cd"), "Ci/Cd");
        assert_eq!(title_case("spring boot"), "Spring Boot");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("aws"), "Aws");
        assert_eq!(title_case("b.tech"), "B.Tech");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        for term in SKILLS {
            let once = title_case(term);
            assert_eq!(title_case(&once), once);
        }
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("EXPERIENCE"));
        assert!(is_all_uppercase("SKILLS & TOOLS 2024"));
        assert!(!is_all_uppercase("Experience"));
        assert!(!is_all_uppercase("2019 - 2024"));
    }

    #[test]
    fn test_aliases_are_lowercase() {
        for (alias, target) in SKILL_ALIASES {
            assert_eq!(*alias, alias.to_lowercase());
            assert_eq!(*target, target.to_lowercase());
        }
    }
}
