use serde::{Deserialize, Serialize};

/// External job-listing providers, in the order the aggregator queries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSource {
    #[serde(rename = "Google Jobs")]
    GoogleJobs,
    #[serde(rename = "Adzuna")]
    Adzuna,
    #[serde(rename = "JSearch")]
    JSearch,
    #[serde(rename = "ArbeitsNow")]
    ArbeitsNow,
    /// Canned example data in degraded responses; never queried.
    #[serde(rename = "Sample")]
    Sample,
}

impl JobSource {
    pub const PRIORITY: [JobSource; 4] = [
        JobSource::GoogleJobs,
        JobSource::Adzuna,
        JobSource::JSearch,
        JobSource::ArbeitsNow,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            JobSource::GoogleJobs => "Google Jobs",
            JobSource::Adzuna => "Adzuna",
            JobSource::JSearch => "JSearch",
            JobSource::ArbeitsNow => "ArbeitsNow",
            JobSource::Sample => "Sample",
        }
    }

    /// Prefix used when building listing ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            JobSource::GoogleJobs => "google",
            JobSource::Adzuna => "adzuna",
            JobSource::JSearch => "jsearch",
            JobSource::ArbeitsNow => "arbeitnow",
            JobSource::Sample => "sample",
        }
    }
}

impl std::fmt::Display for JobSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Fresher,
    #[default]
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

/// Auxiliary market metadata attached to every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub job_market: String,
    pub currency: String,
    pub notice_period: String,
    pub visa_required: bool,
}

impl Default for MarketInsights {
    fn default() -> Self {
        Self {
            job_market: "India".to_string(),
            currency: "INR".to_string(),
            notice_period: "30-60 days typical".to_string(),
            visa_required: false,
        }
    }
}

/// A provider listing normalized into the common schema.
/// Request-scoped: built from a live API response and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    /// Source prefix plus provider id (or a content hash when the provider has none).
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    /// At most 500 characters.
    pub description: String,
    pub source: JobSource,
    pub url: String,
    pub posted_date: String,
    pub job_type: String,
    pub remote: bool,
    /// Up to 6 canonical skills found in the description.
    pub requirements: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub market_insights: MarketInsights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_as_display_name() {
        for source in JobSource::PRIORITY {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.display_name()));
        }
    }

    #[test]
    fn test_experience_level_wire_names() {
        assert_eq!(serde_json::to_string(&ExperienceLevel::MidLevel).unwrap(), "\"Mid-level\"");
        assert_eq!(serde_json::to_string(&ExperienceLevel::Fresher).unwrap(), "\"Fresher\"");
        assert_eq!(ExperienceLevel::default(), ExperienceLevel::MidLevel);
    }
}
