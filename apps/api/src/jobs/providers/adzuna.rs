use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{decode_records, get_json, JobProvider, ProviderError, RawJob};
use crate::jobs::normalize::{
    content_hash, extract_requirements, mentions_remote, or_default, scalar_to_string,
    truncate_chars, DESCRIPTION_MAX_CHARS, FULL_TIME, NOT_DISCLOSED, NOT_SPECIFIED,
    NO_DESCRIPTION, RECENT,
};
use crate::models::job::{ExperienceLevel, JobListing, JobSource, MarketInsights};

const ADZUNA_URL: &str = "https://api.adzuna.com/v1/api/jobs/in/search/1";
const MAX_PER_REQUEST: usize = 10;

/// Adzuna's structured job search. Needs both `ADZUNA_APP_ID` and `ADZUNA_APP_KEY`.
pub struct AdzunaProvider {
    client: reqwest::Client,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl AdzunaProvider {
    pub fn new(client: reqwest::Client, app_id: Option<String>, app_key: Option<String>) -> Self {
        Self {
            client,
            app_id,
            app_key,
        }
    }
}

#[async_trait]
impl JobProvider for AdzunaProvider {
    fn source(&self) -> JobSource {
        JobSource::Adzuna
    }

    fn is_configured(&self) -> bool {
        self.app_id.is_some() && self.app_key.is_some()
    }

    async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError> {
        let (Some(app_id), Some(app_key)) = (self.app_id.as_deref(), self.app_key.as_deref())
        else {
            return Ok(Vec::new());
        };

        let per_page = limit.min(MAX_PER_REQUEST).to_string();
        debug!("Adzuna search: what='{title}', results_per_page={per_page}");

        let body = get_json(self.client.get(ADZUNA_URL).query(&[
            ("app_id", app_id),
            ("app_key", app_key),
            ("what", title),
            ("where", "india"),
            ("results_per_page", per_page.as_str()),
        ]))
        .await?;

        Ok(decode_records::<AdzunaJob>(&body, "results", limit)
            .into_iter()
            .map(RawJob::Adzuna)
            .collect())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaJob {
    /// Usually a string, occasionally a bare number.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<DisplayName>,
    #[serde(default)]
    pub location: Option<DisplayName>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayName {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AdzunaJob {
    pub fn into_listing(self) -> Option<JobListing> {
        if self.title.is_none() && self.description.is_none() {
            return None;
        }

        let title = or_default(self.title, NOT_SPECIFIED);
        let provider_id = self
            .id
            .as_ref()
            .and_then(scalar_to_string)
            .unwrap_or_else(|| content_hash(&[title.as_str()]).to_string());
        let raw_description = self.description.unwrap_or_default();

        Some(JobListing {
            id: format!("{}_{provider_id}", JobSource::Adzuna.id_prefix()),
            title,
            company: or_default(self.company.and_then(|c| c.display_name), NOT_SPECIFIED),
            location: or_default(self.location.and_then(|l| l.display_name), "India"),
            salary: format_salary(self.salary_min, self.salary_max),
            description: truncate_chars(
                &or_default(Some(raw_description.clone()), NO_DESCRIPTION),
                DESCRIPTION_MAX_CHARS,
            ),
            source: JobSource::Adzuna,
            url: or_default(self.redirect_url, "https://www.adzuna.co.in/"),
            posted_date: or_default(self.created, RECENT),
            job_type: FULL_TIME.to_string(),
            remote: mentions_remote(&raw_description),
            requirements: extract_requirements(&raw_description),
            experience_level: ExperienceLevel::default(),
            market_insights: MarketInsights::default(),
        })
    }
}

/// `₹min-max` in whole rupees; "Not disclosed" without a non-zero minimum.
fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match min {
        Some(min) if min > 0.0 => {
            format!("₹{}-{}", min.round() as u64, max.unwrap_or(0.0).round() as u64)
        }
        _ => NOT_DISCLOSED.to_string(),
    }
}
