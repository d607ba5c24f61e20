//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MEUP_*)
//! 2. TOML config file (if MEUP_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MEUP_*)
/// 2. TOML config file (if MEUP_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the analytics backend.
    ///
    /// Set via MEUP_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token for the TikTok Business API.
    ///
    /// Set via MEUP_ACCESS_TOKEN environment variable.
    /// Required only when Business API calls are made.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Advertiser ids to query, in priority order.
    ///
    /// Set via MEUP_ADVERTISER_IDS environment variable (comma-separated).
    #[serde(default)]
    pub advertiser_ids: Vec<String>,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MEUP_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MEUP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Freshness window for cached report responses, in seconds.
    ///
    /// Set via MEUP_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Quiet period before a debounced refetch fires, in milliseconds.
    ///
    /// Set via MEUP_DEBOUNCE_MS environment variable.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long to suppress network calls after an HTTP 429, in seconds.
    ///
    /// Set via MEUP_RATE_LIMIT_COOLDOWN_SECS environment variable.
    #[serde(default = "default_cooldown_secs")]
    pub rate_limit_cooldown_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".into()
}

fn default_user_agent() -> String {
    "meup/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_cooldown_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            advertiser_ids: Vec::new(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            debounce_ms: default_debounce_ms(),
            rate_limit_cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Debounce quiet period as Duration.
    ///
    /// Consumed by interactive frontends that construct a
    /// [`Debouncer`](crate::cache::Debouncer) around their refetch callback;
    /// the one-shot CLI fetches immediately and ignores it.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Rate-limit cooldown as Duration.
    pub fn rate_limit_cooldown(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cooldown_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MEUP_`
    /// 2. TOML file from `MEUP_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MEUP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MEUP_")
                .map(|key| key.as_str().to_lowercase().into())
                .ignore(&["advertiser_ids"])
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        // Env values are flat strings, so the advertiser id list is accepted
        // comma-separated and split here rather than parsed as an array.
        if let Ok(raw) = std::env::var("MEUP_ADVERTISER_IDS") {
            config.advertiser_ids =
                raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect();
        }

        config.validate()?;

        Ok(config)
    }

    /// Check if the Business API access token is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the access token is not set.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.access_token.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "access_token".into(),
            hint: "Set MEUP_ACCESS_TOKEN environment variable".into(),
        })
    }
}
