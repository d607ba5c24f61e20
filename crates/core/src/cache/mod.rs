//! In-memory response caching for report queries.
//!
//! This module provides the client-side freshness layer between the UI and
//! the analytics backend:
//!
//! - [`ResponseCache`] — TTL-bounded memoization of responses by query key
//! - [`QueryKey`] — typed cache-key builder for report queries
//! - [`Debouncer`] — trailing-edge coalescing of rapid user-driven refetches
//! - [`SingleFlight`] — opt-in per-key serialization of loads
//!
//! Entries are evicted lazily on lookup, never swept proactively; the cache
//! lives for the lifetime of the process.

pub mod debounce;
pub mod key;
pub mod single_flight;

pub use debounce::Debouncer;
pub use key::{QueryKey, ReportKind};
pub use single_flight::SingleFlight;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};

/// Default freshness window for cached responses (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached response with its storage timestamp.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    payload: T,
    stored_at: DateTime<Utc>,
}

/// In-memory TTL cache for report responses.
///
/// Uses a HashMap behind a tokio RwLock. An entry is valid iff
/// `now - stored_at < ttl`; stale entries are dropped on the next lookup
/// for their key.
///
/// Concurrent [`ResponseCache::fetch_with`] calls for the same key are not
/// deduplicated: each miss invokes its own loader. Wrap lookups in a
/// [`SingleFlight`] where that matters.
pub struct ResponseCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ResponseCache<T> {
    /// Create a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            clock,
        }
    }

    fn is_fresh(&self, entry: &CacheEntry<T>) -> bool {
        self.clock.now() - entry.stored_at < self.ttl
    }

    /// Look up a live entry, lazily evicting a stale one.
    pub async fn get(&self, key: &str) -> Option<T> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if self.is_fresh(entry) => return Some(entry.payload.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key)
            && !self.is_fresh(entry)
        {
            tracing::debug!("evicting expired cache entry for {}", key);
            entries.remove(key);
        }
        None
    }

    /// Store a payload under `key`, overwriting any prior entry.
    pub async fn set(&self, key: &str, payload: T) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry { payload, stored_at: self.clock.now() });
    }

    /// Whether a live entry exists for `key`.
    pub async fn has(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).is_some_and(|e| self.is_fresh(e))
    }

    /// Resolve from cache, or invoke `loader` and store its result.
    ///
    /// On a hit the loader is never invoked. On a miss the loader runs; a
    /// successful payload is stored with a fresh timestamp, a failure caches
    /// nothing and the error propagates to the caller.
    pub async fn fetch_with<F, Fut, E>(&self, key: &str, loader: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!("cache hit for {}", key);
            return Ok(hit);
        }

        tracing::debug!("cache miss for {}, invoking loader", key);
        let payload = loader().await?;
        self.set(key, payload.clone()).await;
        Ok(payload)
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Drop every expired entry.
    pub async fn evict_expired(&self) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| self.is_fresh(entry));
    }
}
