use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{decode_records, get_json, JobProvider, ProviderError, RawJob};
use crate::jobs::normalize::{
    content_hash, extract_requirements, or_default, scalar_to_string, truncate_chars,
    DESCRIPTION_MAX_CHARS, FULL_TIME, NOT_DISCLOSED, NOT_SPECIFIED, NO_DESCRIPTION, RECENT,
};
use crate::models::job::{ExperienceLevel, JobListing, JobSource, MarketInsights};

const ARBEITNOW_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

/// ArbeitsNow's free job board. No key, and no search terms: the feed head
/// is the same for every title.
pub struct ArbeitnowProvider {
    client: reqwest::Client,
    enabled: bool,
}

impl ArbeitnowProvider {
    pub fn new(client: reqwest::Client, enabled: bool) -> Self {
        Self { client, enabled }
    }
}

#[async_trait]
impl JobProvider for ArbeitnowProvider {
    fn source(&self) -> JobSource {
        JobSource::ArbeitsNow
    }

    fn is_configured(&self) -> bool {
        self.enabled
    }

    fn takes_search_terms(&self) -> bool {
        false
    }

    async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError> {
        if !self.enabled {
            return Ok(Vec::new());
        }

        debug!("ArbeitsNow board fetch for '{title}', keeping {limit}");
        let body = get_json(self.client.get(ARBEITNOW_URL)).await?;

        Ok(decode_records::<ArbeitnowJob>(&body, "data", limit)
            .into_iter()
            .map(RawJob::ArbeitsNow)
            .collect())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArbeitnowJob {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Unix seconds on the live feed.
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub remote: Option<bool>,
}

impl ArbeitnowJob {
    pub fn into_listing(self) -> Option<JobListing> {
        if self.title.is_none() && self.description.is_none() {
            return None;
        }

        let title = or_default(self.title, NOT_SPECIFIED);
        let provider_id = self
            .slug
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or_else(|| content_hash(&[title.as_str()]).to_string());
        let raw_description = self.description.unwrap_or_default();

        Some(JobListing {
            id: format!("{}_{provider_id}", JobSource::ArbeitsNow.id_prefix()),
            title,
            company: or_default(self.company_name, NOT_SPECIFIED),
            location: or_default(self.location, "Remote"),
            salary: NOT_DISCLOSED.to_string(),
            description: truncate_chars(
                &or_default(Some(raw_description.clone()), NO_DESCRIPTION),
                DESCRIPTION_MAX_CHARS,
            ),
            source: JobSource::ArbeitsNow,
            url: or_default(self.url, "https://www.arbeitnow.com/"),
            posted_date: or_default(self.created_at.as_ref().and_then(scalar_to_string), RECENT),
            job_type: FULL_TIME.to_string(),
            remote: self.remote.unwrap_or(true),
            requirements: extract_requirements(&raw_description),
            experience_level: ExperienceLevel::default(),
            market_insights: MarketInsights::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_record_maps_fields() {
        let job: ArbeitnowJob = serde_json::from_value(json!({
            "slug": "platform-engineer-berlin-123",
            "title": "Platform Engineer",
            "company_name": "Hooli",
            "location": "Berlin",
            "description": "<p>Kubernetes, Docker and Git daily.</p>",
            "url": "https://www.arbeitnow.com/jobs/123",
            "created_at": 1714550400,
            "tags": ["devops"]
        }))
        .unwrap();

        let listing = job.into_listing().unwrap();
        assert_eq!(listing.id, "arbeitnow_platform-engineer-berlin-123");
        assert_eq!(listing.posted_date, "1714550400");
        assert_eq!(listing.salary, "Not disclosed");
        assert!(listing.remote);
        assert_eq!(listing.requirements, vec!["Docker", "Kubernetes", "Git"]);
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let listing = ArbeitnowJob {
            title: Some("Designer".to_string()),
            remote: Some(false),
            ..ArbeitnowJob::default()
        }
        .into_listing()
        .unwrap();
        assert_eq!(listing.location, "Remote");
        assert_eq!(listing.posted_date, "Recent");
        assert!(!listing.remote);
    }

    #[test]
    fn test_disabled_board_is_not_configured() {
        let provider = ArbeitnowProvider::new(reqwest::Client::new(), false);
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_board_ignores_search_terms() {
        let provider = ArbeitnowProvider::new(reqwest::Client::new(), true);
        assert!(provider.is_configured());
        assert!(!provider.takes_search_terms());
    }
}
