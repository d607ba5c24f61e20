//! Analytics backend API client.
//!
//! Thin client over the dashboard backend's report endpoints:
//!
//! - `GET {base}/api/ads-overview?start_date&end_date`
//! - `GET {base}/api/gmv-max-product?start_date&end_date`
//!
//! Responses arrive as a `{ "data": { "list": [...] } }` envelope and are
//! normalized into [`Report`]. HTTP 429 surfaces as
//! [`ApiError::RateLimited`] so the caller can apply its cooldown policy;
//! the client itself never retries.

pub mod error;
pub mod request;
pub mod response;

pub use error::ApiError;
pub use request::{ReportQuery, parse_iso_date};
pub use response::{MetricRecord, Report, ReportTotals};

use std::time::Duration;

use meup_core::{AppConfig, ReportKind};
use url::Url;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "meup/0.1";

/// Analytics client configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: meup/0.x).
    pub user_agent: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for ShopConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Report endpoint path for each query kind.
fn path_for(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::AdsOverview => "/api/ads-overview",
        ReportKind::GmvMaxProduct => "/api/gmv-max-product",
    }
}

/// Client for the analytics backend.
#[derive(Debug, Clone)]
pub struct ShopClient {
    http: reqwest::Client,
    config: ShopConfig,
}

impl ShopClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ShopConfig) -> Result<Self, ApiError> {
        // Validate the base URL up front so every request site can format
        // paths with plain string concatenation.
        Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidQuery(format!("invalid base_url {:?}: {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the report the query targets.
    pub async fn report(&self, query: &ReportQuery) -> Result<Report, ApiError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path_for(query.kind));

        tracing::debug!("fetching {} for {}", url, query.range);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("report response status: {}", status);

        if status == 401 || status == 403 {
            return Err(ApiError::AuthError);
        }
        if status == 429 {
            return Err(ApiError::RateLimited);
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let envelope: response::ApiEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))?;

        let report = Report::from(envelope);
        tracing::debug!("report for {} has {} records", query.cache_key(), report.records.len());
        Ok(report)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }
}
