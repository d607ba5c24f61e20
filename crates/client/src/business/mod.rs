//! TikTok Business API collaborator.
//!
//! Bearer-token-authenticated REST calls for advertiser info, campaigns,
//! stores and GMV-Max reporting. The API is treated as opaque: payloads are
//! returned as raw JSON values and the authorization handshake that
//! produces the access token happens outside this process.

pub mod token;

pub use token::TokenStore;

use std::time::Duration;

use serde_json::Value;

use crate::api::ApiError;

/// Default Business API base URL.
const DEFAULT_BASE_URL: &str = "https://business-api.tiktok.com/open_api/v1.3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Business API client configuration.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    /// Access token produced by the external authorization flow.
    pub access_token: String,
    /// Base URL (default: the v1.3 open API).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// TikTok Business API client.
#[derive(Debug, Clone)]
pub struct BusinessClient {
    http: reqwest::Client,
    config: BusinessConfig,
}

impl BusinessClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BusinessConfig) -> Result<Self, ApiError> {
        if config.access_token.is_empty() {
            return Err(ApiError::AuthError);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http, config })
    }

    /// Advertiser account details for the given ids.
    pub async fn advertiser_info(&self, advertiser_ids: &[String]) -> Result<Value, ApiError> {
        self.get("/advertiser/info/", &[("advertiser_ids", serde_json::to_string(advertiser_ids).unwrap_or_default())])
            .await
    }

    /// Campaign list for one advertiser.
    pub async fn campaigns(&self, advertiser_id: &str) -> Result<Value, ApiError> {
        self.get("/campaign/get/", &[("advertiser_id", advertiser_id.to_string())]).await
    }

    /// Store list bound to one advertiser.
    pub async fn stores(&self, advertiser_id: &str) -> Result<Value, ApiError> {
        self.get("/store/list/", &[("advertiser_id", advertiser_id.to_string())]).await
    }

    /// GMV-Max report rows for one advertiser and date window.
    pub async fn gmv_max_report(
        &self, advertiser_id: &str, start_date: &str, end_date: &str,
    ) -> Result<Value, ApiError> {
        self.get(
            "/report/gmv_max/get/",
            &[
                ("advertiser_id", advertiser_id.to_string()),
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
            ],
        )
        .await
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!("business API call: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Access-Token", &self.config.access_token)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
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
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}
