use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::jobs::normalize::post_process;
use crate::jobs::providers::{default_providers, JobProvider, ProviderError, RawJob};
use crate::jobs::titles::derive_job_titles;
use crate::models::job::{JobListing, JobSource};

/// Walks the providers in priority order until enough listings are collected.
///
/// A failing provider contributes nothing and the walk moves on; nothing here
/// returns an error to the caller. A courtesy pause follows every per-title
/// request and every provider that was actually queried.
pub struct JobAggregator {
    providers: Vec<Arc<dyn JobProvider>>,
    pause: Duration,
}

impl JobAggregator {
    pub fn new(providers: Vec<Arc<dyn JobProvider>>, pause: Duration) -> Self {
        Self { providers, pause }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self::new(default_providers(config, client), config.provider_pause()))
    }

    pub fn configured_sources(&self) -> Vec<JobSource> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.source())
            .collect()
    }

    /// Returns up to `limit` listings relevant to `skills`, in provider
    /// priority order then arrival order. Listings are unique by id.
    pub async fn fetch_jobs(&self, limit: usize, skills: &[String]) -> Vec<JobListing> {
        let titles = derive_job_titles(skills);
        info!("Fetching up to {limit} jobs for titles {titles:?}");

        let mut jobs: Vec<JobListing> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for provider in &self.providers {
            if jobs.len() >= limit {
                break;
            }
            let source = provider.source();
            if !provider.is_configured() {
                debug!("Skipping {source}: not configured");
                continue;
            }

            let remaining = limit - jobs.len();
            match self.query_provider(provider.as_ref(), &titles, remaining).await {
                Ok(records) => {
                    let before = jobs.len();
                    for record in records {
                        let Some(mut listing) = record.normalize() else {
                            continue;
                        };
                        if !seen.insert(listing.id.clone()) {
                            continue;
                        }
                        post_process(&mut listing);
                        jobs.push(listing);
                    }
                    info!("{source} contributed {} jobs", jobs.len() - before);
                }
                Err(e) => warn!("{source} failed, continuing without it: {e}"),
            }

            tokio::time::sleep(self.pause).await;
        }

        jobs.truncate(limit);
        info!("Aggregated {} jobs", jobs.len());
        jobs
    }

    /// One request per title, each capped at an even share of `remaining`.
    /// A provider that ignores search terms gets a single request for all of
    /// `remaining`. Errors only if every request failed.
    async fn query_provider(
        &self,
        provider: &dyn JobProvider,
        titles: &[String],
        remaining: usize,
    ) -> Result<Vec<RawJob>, ProviderError> {
        let (titles, per_title) = if provider.takes_search_terms() {
            (titles, (remaining / titles.len().max(1)).max(1))
        } else {
            (&titles[..titles.len().min(1)], remaining)
        };
        let mut records = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;

        for title in titles {
            match provider.search(title, per_title).await {
                Ok(batch) => {
                    succeeded += 1;
                    records.extend(batch);
                }
                Err(e) => {
                    warn!("{} search for '{title}' failed: {e}", provider.source());
                    last_error = Some(e);
                }
            }
            tokio::time::sleep(self.pause).await;
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::providers::ArbeitnowJob;
    use crate::models::job::ExperienceLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeProvider {
        name: &'static str,
        source: JobSource,
        configured: bool,
        per_call: usize,
        failing_titles: Vec<&'static str>,
        fail_everything: bool,
        shared_ids: bool,
        ignores_titles: bool,
        description: &'static str,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl FakeProvider {
        fn new(name: &'static str, source: JobSource) -> Self {
            Self {
                name,
                source,
                configured: true,
                per_call: 10,
                failing_titles: Vec::new(),
                fail_everything: false,
                shared_ids: false,
                ignores_titles: false,
                description: "Python and Docker backend work",
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JobProvider for FakeProvider {
        fn source(&self) -> JobSource {
            self.source
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        fn takes_search_terms(&self) -> bool {
            !self.ignores_titles
        }

        async fn search(&self, title: &str, limit: usize) -> Result<Vec<RawJob>, ProviderError> {
            self.calls.lock().unwrap().push((title.to_string(), limit));
            if self.fail_everything || self.failing_titles.iter().any(|t| *t == title) {
                return Err(ProviderError::Status(503));
            }
            Ok((0..limit.min(self.per_call))
                .map(|i| {
                    let slug = if self.shared_ids {
                        format!("{}-{i}", self.name)
                    } else {
                        format!("{}-{title}-{i}", self.name)
                    };
                    RawJob::ArbeitsNow(ArbeitnowJob {
                        slug: Some(slug),
                        title: Some(title.to_string()),
                        description: Some(self.description.to_string()),
                        ..ArbeitnowJob::default()
                    })
                })
                .collect())
        }
    }

    fn aggregator(providers: Vec<Arc<FakeProvider>>) -> JobAggregator {
        let providers = providers
            .into_iter()
            .map(|p| p as Arc<dyn JobProvider>)
            .collect();
        JobAggregator::new(providers, Duration::from_secs(1))
    }

    fn python() -> Vec<String> {
        vec!["Python".to_string()]
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_configured_providers_yields_empty() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.configured = false;
        let mut b = FakeProvider::new("b", JobSource::ArbeitsNow);
        b.configured = false;
        let (a, b) = (Arc::new(a), Arc::new(b));

        let jobs = aggregator(vec![a.clone(), b.clone()]).fetch_jobs(20, &python()).await;
        assert!(jobs.is_empty());
        assert!(a.calls().is_empty());
        assert!(b.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queries_once_per_title_with_even_share() {
        let a = Arc::new(FakeProvider::new("a", JobSource::GoogleJobs));
        let jobs = aggregator(vec![a.clone()]).fetch_jobs(9, &python()).await;

        let calls = a.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, limit)| *limit == 3));
        assert_eq!(jobs.len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_once_target_reached() {
        let a = Arc::new(FakeProvider::new("a", JobSource::GoogleJobs));
        let b = Arc::new(FakeProvider::new("b", JobSource::Adzuna));

        let jobs = aggregator(vec![a.clone(), b.clone()]).fetch_jobs(6, &python()).await;
        assert_eq!(jobs.len(), 6);
        assert!(jobs.iter().all(|j| j.id.starts_with("arbeitnow_a-")));
        assert!(b.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_priority_order_preserved() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.per_call = 1;
        let b = FakeProvider::new("b", JobSource::Adzuna);
        let (a, b) = (Arc::new(a), Arc::new(b));

        let jobs = aggregator(vec![a, b]).fetch_jobs(12, &python()).await;
        assert_eq!(jobs.len(), 12);
        assert!(jobs[..3].iter().all(|j| j.id.starts_with("arbeitnow_a-")));
        assert!(jobs[3..].iter().all(|j| j.id.starts_with("arbeitnow_b-")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfigured_provider_skipped() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.configured = false;
        let b = FakeProvider::new("b", JobSource::Adzuna);
        let (a, b) = (Arc::new(a), Arc::new(b));

        let agg = aggregator(vec![a.clone(), b.clone()]);
        assert_eq!(agg.configured_sources(), vec![JobSource::Adzuna]);

        let jobs = agg.fetch_jobs(4, &[]).await;
        assert!(a.calls().is_empty());
        // No skills: the two default titles, two listings each.
        assert_eq!(b.calls().len(), 2);
        assert_eq!(jobs.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_provider_does_not_abort() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.fail_everything = true;
        let b = FakeProvider::new("b", JobSource::Adzuna);

        let jobs = aggregator(vec![Arc::new(a), Arc::new(b)]).fetch_jobs(3, &python()).await;
        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|j| j.id.starts_with("arbeitnow_b-")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_failing_title_keeps_the_rest() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.failing_titles = vec!["Python Developer"];
        let a = Arc::new(a);

        let jobs = aggregator(vec![a.clone()]).fetch_jobs(6, &python()).await;
        assert_eq!(a.calls().len(), 3);
        assert_eq!(jobs.len(), 4);
        assert!(jobs.iter().all(|j| j.title != "Python Developer"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_ids_collapsed() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.shared_ids = true;
        let a = Arc::new(a);

        let jobs = aggregator(vec![a]).fetch_jobs(6, &python()).await;
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["arbeitnow_a-0", "arbeitnow_a-1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_share_never_drops_below_one() {
        let a = Arc::new(FakeProvider::new("a", JobSource::GoogleJobs));
        let jobs = aggregator(vec![a.clone()]).fetch_jobs(2, &python()).await;
        assert!(a.calls().iter().all(|(_, limit)| *limit == 1));
        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_processing_applied() {
        let mut a = FakeProvider::new("a", JobSource::GoogleJobs);
        a.description = "Senior engineer, 5+ years";
        let jobs = aggregator(vec![Arc::new(a)]).fetch_jobs(3, &python()).await;
        assert!(jobs.iter().all(|j| j.experience_level == ExperienceLevel::Senior));
        assert!(jobs.iter().all(|j| j.market_insights.job_market == "India"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_after_each_title_and_provider() {
        let a = Arc::new(FakeProvider::new("a", JobSource::GoogleJobs));
        let start = tokio::time::Instant::now();
        aggregator(vec![a]).fetch_jobs(30, &python()).await;
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_provider_fetched_once_for_whole_remainder() {
        let mut board = FakeProvider::new("board", JobSource::ArbeitsNow);
        board.ignores_titles = true;
        board.per_call = 50;
        let board = Arc::new(board);

        let started = tokio::time::Instant::now();
        let jobs = aggregator(vec![board.clone()]).fetch_jobs(20, &python()).await;

        let calls = board.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 20);
        assert_eq!(jobs.len(), 20);
        // One pause after the request, one after the provider.
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }
}
