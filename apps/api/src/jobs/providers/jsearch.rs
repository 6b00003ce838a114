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

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// JSearch aggregator on RapidAPI. Needs `RAPIDAPI_KEY`.
pub struct JSearchProvider {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl JSearchProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl JobProvider for JSearchProvider {
    fn source(&self) -> JobSource {
        JobSource::JSearch
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let query = format!("{title} in India");
        debug!("JSearch search: query='{query}', keeping {limit}");

        let body = get_json(
            self.client
                .get(JSEARCH_URL)
                .header("X-RapidAPI-Key", api_key)
                .header("X-RapidAPI-Host", JSEARCH_HOST)
                .query(&[
                    ("query", query.as_str()),
                    ("page", "1"),
                    ("num_pages", "1"),
                    ("date_posted", "all"),
                ]),
        )
        .await?;

        Ok(decode_records::<JSearchJob>(&body, "data", limit)
            .into_iter()
            .map(RawJob::JSearch)
            .collect())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JSearchJob {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    /// String, number or null depending on the listing.
    #[serde(default)]
    pub job_salary: Option<Value>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_is_remote: Option<bool>,
}

impl JSearchJob {
    pub fn into_listing(self) -> Option<JobListing> {
        if self.job_title.is_none() && self.job_description.is_none() {
            return None;
        }

        let title = or_default(self.job_title, NOT_SPECIFIED);
        let provider_id = self
            .job_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| content_hash(&[title.as_str()]).to_string());
        let raw_description = self.job_description.unwrap_or_default();

        Some(JobListing {
            id: format!("{}_{provider_id}", JobSource::JSearch.id_prefix()),
            title,
            company: or_default(self.employer_name, NOT_SPECIFIED),
            location: or_default(self.job_city, "India"),
            salary: or_default(self.job_salary.as_ref().and_then(scalar_to_string), NOT_DISCLOSED),
            description: truncate_chars(
                &or_default(Some(raw_description.clone()), NO_DESCRIPTION),
                DESCRIPTION_MAX_CHARS,
            ),
            source: JobSource::JSearch,
            url: or_default(self.job_apply_link, "https://www.google.com/search?q=jobs"),
            posted_date: or_default(self.job_posted_at_datetime_utc, RECENT),
            job_type: or_default(self.job_employment_type, FULL_TIME),
            remote: self.job_is_remote.unwrap_or(false),
            requirements: extract_requirements(&raw_description),
            experience_level: ExperienceLevel::default(),
            market_insights: MarketInsights::default(),
        })
    }
}
