use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{decode_records, get_json, JobProvider, ProviderError, RawJob};
use crate::jobs::normalize::{
    content_hash, extract_requirements, mentions_remote, or_default, truncate_chars,
    DESCRIPTION_MAX_CHARS, FULL_TIME, NOT_DISCLOSED, NOT_SPECIFIED, NO_DESCRIPTION, RECENT,
};
use crate::models::job::{ExperienceLevel, JobListing, JobSource, MarketInsights};

const SERPAPI_URL: &str = "https://serpapi.com/search";
const MAX_PER_REQUEST: usize = 10;

/// Google Jobs results via SerpApi. Needs `SERPAPI_API_KEY`.
pub struct GoogleJobsProvider {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleJobsProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl JobProvider for GoogleJobsProvider {
    fn source(&self) -> JobSource {
        JobSource::GoogleJobs
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let num = limit.min(MAX_PER_REQUEST).to_string();
        let query = format!("{title} jobs in India");
        debug!("Google Jobs search: q='{query}', num={num}");

        let body = get_json(self.client.get(SERPAPI_URL).query(&[
            ("engine", "google_jobs"),
            ("q", query.as_str()),
            ("location", "India"),
            ("api_key", api_key),
            ("num", num.as_str()),
        ]))
        .await?;

        Ok(decode_records::<GoogleJob>(&body, "jobs_results", limit)
            .into_iter()
            .map(RawJob::GoogleJobs)
            .collect())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub share_link: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub detected_extensions: Option<GoogleExtensions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleExtensions {
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
}

impl GoogleJob {
    pub fn into_listing(self) -> Option<JobListing> {
        if self.title.is_none() && self.company_name.is_none() && self.description.is_none() {
            return None;
        }

        let title = or_default(self.title, NOT_SPECIFIED);
        let company = or_default(self.company_name, NOT_SPECIFIED);
        let id = format!(
            "{}_{}",
            JobSource::GoogleJobs.id_prefix(),
            content_hash(&[title.as_str(), company.as_str()])
        );
        let extensions = self.detected_extensions.unwrap_or_default();
        let raw_description = self.description.unwrap_or_default();

        Some(JobListing {
            id,
            title,
            company,
            location: or_default(self.location, "India"),
            salary: or_default(self.salary.or(extensions.salary), NOT_DISCLOSED),
            description: truncate_chars(
                &or_default(Some(raw_description.clone()), NO_DESCRIPTION),
                DESCRIPTION_MAX_CHARS,
            ),
            source: JobSource::GoogleJobs,
            url: or_default(self.share_link, "https://www.google.com/search?q=jobs"),
            posted_date: or_default(self.posted_at.or(extensions.posted_at), RECENT),
            job_type: FULL_TIME.to_string(),
            remote: mentions_remote(&raw_description),
            requirements: extract_requirements(&raw_description),
            experience_level: ExperienceLevel::default(),
            market_insights: MarketInsights::default(),
        })
    }
}
