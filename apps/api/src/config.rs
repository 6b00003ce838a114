use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_JOB_FETCH_LIMIT: usize = 20;
const DEFAULT_PROVIDER_PAUSE_MS: u64 = 1000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Process-wide configuration, read once at startup.
///
/// Every credential is optional. A missing key never fails startup: the AI
/// ranker falls back to deterministic scoring and job providers without
/// credentials are skipped.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub serpapi_api_key: Option<String>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub rapidapi_key: Option<String>,
    /// ArbeitsNow needs no key, so it is switched on and off explicitly.
    pub arbeitnow_enabled: bool,
    pub port: u16,
    pub rust_log: String,
    pub environment: String,
    pub job_fetch_limit: usize,
    pub provider_pause_ms: u64,
    pub http_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            gemini_api_key: optional("GEMINI_API_KEY"),
            serpapi_api_key: optional("SERPAPI_API_KEY"),
            adzuna_app_id: optional("ADZUNA_APP_ID"),
            adzuna_app_key: optional("ADZUNA_APP_KEY"),
            rapidapi_key: optional("RAPIDAPI_KEY"),
            arbeitnow_enabled: parse_flag(optional("ARBEITNOW_ENABLED"), true)
                .context("ARBEITNOW_ENABLED must be true or false")?,
            port: parse_or(optional("PORT"), DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            environment: optional("ENVIRONMENT").unwrap_or_else(|| "production".to_string()),
            job_fetch_limit: parse_or(optional("JOB_FETCH_LIMIT"), DEFAULT_JOB_FETCH_LIMIT)
                .context("JOB_FETCH_LIMIT must be a non-negative integer")?,
            provider_pause_ms: parse_or(optional("PROVIDER_PAUSE_MS"), DEFAULT_PROVIDER_PAUSE_MS)
                .context("PROVIDER_PAUSE_MS must be a non-negative integer")?,
            http_timeout_secs: parse_or(optional("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)
                .context("HTTP_TIMEOUT_SECS must be a non-negative integer")?,
            max_upload_bytes: parse_or(optional("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a non-negative integer")?,
        })
    }

    pub fn ai_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn serpapi_configured(&self) -> bool {
        self.serpapi_api_key.is_some()
    }

    pub fn adzuna_configured(&self) -> bool {
        self.adzuna_app_id.is_some() && self.adzuna_app_key.is_some()
    }

    pub fn jsearch_configured(&self) -> bool {
        self.rapidapi_key.is_some()
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }

    pub fn provider_pause(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.provider_pause_ms)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.trim().parse::<T>()?),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => anyhow::bail!("unrecognised flag value '{v}'"),
    }
}
