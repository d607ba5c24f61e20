//! In-memory token store with expiry.
//!
//! Mirrors the dashboard's persisted token cache: entries are keyed by a
//! fixed string prefix plus a scope (advertiser id), carry an expiry
//! timestamp and are only returned while still valid.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use meup_core::{Clock, SystemClock};

/// Key prefix for stored tokens.
const TOKEN_KEY_PREFIX: &str = "meup_token_";

#[derive(Debug, Clone)]
struct StoredToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Process-lifetime store of scoped access tokens.
pub struct TokenStore {
    entries: RwLock<HashMap<String, StoredToken>>,
    clock: Arc<dyn Clock>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), clock }
    }

    fn key(scope: &str) -> String {
        format!("{}{}", TOKEN_KEY_PREFIX, scope)
    }

    /// Look up an unexpired token for `scope`.
    pub async fn get(&self, scope: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(&Self::key(scope))
            .filter(|t| t.expires_at > self.clock.now())
            .map(|t| t.token.clone())
    }

    /// Store a token for `scope`, valid for `ttl` from now.
    pub async fn set(&self, scope: &str, token: String, ttl: Duration) {
        let expires_at = self.clock.now() + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        let mut entries = self.entries.write().await;
        entries.insert(Self::key(scope), StoredToken { token, expires_at });
    }

    /// Drop every expired token.
    pub async fn evict_expired(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, t| t.expires_at > now);
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
