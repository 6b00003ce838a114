//! Job providers, one module per external job board, all behind `JobProvider`.
//!
//! Providers only fetch and decode. Each record is decoded on its own so one
//! malformed entry never sinks a whole page; mapping into `JobListing` happens
//! in `RawJob::normalize`.

pub mod adzuna;
pub mod arbeitnow;
pub mod google_jobs;
pub mod jsearch;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::job::{JobListing, JobSource};

pub use adzuna::{AdzunaJob, AdzunaProvider};
pub use arbeitnow::{ArbeitnowJob, ArbeitnowProvider};
pub use google_jobs::{GoogleJob, GoogleJobsProvider};
pub use jsearch::{JSearchJob, JSearchProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("response decode error: {0}")]
    Decode(String),
}

/// A provider record in its native shape.
#[derive(Debug, Clone)]
pub enum RawJob {
    GoogleJobs(GoogleJob),
    Adzuna(AdzunaJob),
    JSearch(JSearchJob),
    ArbeitsNow(ArbeitnowJob),
}

impl RawJob {
    /// Maps the record into the common schema. `None` drops the record.
    pub fn normalize(self) -> Option<JobListing> {
        match self {
            RawJob::GoogleJobs(job) => job.into_listing(),
            RawJob::Adzuna(job) => job.into_listing(),
            RawJob::JSearch(job) => job.into_listing(),
            RawJob::ArbeitsNow(job) => job.into_listing(),
        }
    }
}

#[async_trait]
pub trait JobProvider: Send + Sync {
    fn source(&self) -> JobSource;

    /// False when the credentials this provider needs are absent.
    fn is_configured(&self) -> bool;

    /// False for boards that return the same feed whatever the title.
    /// Those are fetched once per request with the whole remaining count.
    fn takes_search_terms(&self) -> bool {
        true
    }

    /// Searches for one job title, returning at most `limit` records.
    async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError>;
}

/// All providers in priority order, sharing one HTTP client.
pub fn default_providers(config: &Config, client: reqwest::Client) -> Vec<Arc<dyn JobProvider>> {
    vec![
        Arc::new(GoogleJobsProvider::new(
            client.clone(),
            config.serpapi_api_key.clone(),
        )),
        Arc::new(AdzunaProvider::new(
            client.clone(),
            config.adzuna_app_id.clone(),
            config.adzuna_app_key.clone(),
        )),
        Arc::new(JSearchProvider::new(client.clone(), config.rapidapi_key.clone())),
        Arc::new(ArbeitnowProvider::new(client, config.arbeitnow_enabled)),
    ]
}

/// Sends the request and decodes a JSON body, mapping non-2xx to `Status`.
pub(crate) async fn get_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Decodes the array at `key`, skipping records that do not fit `T`.
/// A missing key yields no records.
pub(crate) fn decode_records<T: DeserializeOwned>(body: &Value, key: &str, limit: usize) -> Vec<T> {
    let Some(records) = body.get(key).and_then(Value::as_array) else {
        debug!("Response has no '{key}' array");
        return Vec::new();
    };

    records
        .iter()
        .take(limit)
        .filter_map(|record| match serde_json::from_value::<T>(record.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Dropping malformed record: {e}");
                None
            }
        })
        .collect()
}
