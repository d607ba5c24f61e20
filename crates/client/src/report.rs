//! Cached report pipeline.
//!
//! [`ReportService`] sits between a frontend and the analytics backend:
//! lookups go through the TTL cache under a per-key single-flight lock, and
//! an HTTP 429 arms a cooldown that suppresses further network attempts for
//! a fixed window (cache hits are still served during the cooldown).
//!
//! The cooldown lives here, in the caller layer, not in the cache.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use meup_core::{Clock, Error, ResponseCache, SingleFlight, SystemClock};

use crate::api::{ApiError, Report, ReportQuery, ShopClient};

/// Seam between the report pipeline and the HTTP client, so tests can
/// substitute a counting stub.
#[async_trait::async_trait]
pub trait ReportApi: Send + Sync {
    async fn fetch(&self, query: &ReportQuery) -> Result<Report, ApiError>;
}

#[async_trait::async_trait]
impl ReportApi for ShopClient {
    async fn fetch(&self, query: &ReportQuery) -> Result<Report, ApiError> {
        self.report(query).await
    }
}

/// Cache-fronted, rate-limit-aware report fetcher.
pub struct ReportService<A: ReportApi> {
    api: A,
    cache: ResponseCache<Report>,
    flight: SingleFlight,
    cooldown: chrono::Duration,
    cooldown_until: Mutex<Option<DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl<A: ReportApi> ReportService<A> {
    /// Create a service with the given cache TTL and 429 cooldown.
    pub fn new(api: A, ttl: std::time::Duration, cooldown: std::time::Duration) -> Self {
        Self::with_clock(api, ttl, cooldown, Arc::new(SystemClock))
    }

    /// Create a service with an injected clock.
    pub fn with_clock(
        api: A, ttl: std::time::Duration, cooldown: std::time::Duration, clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            cache: ResponseCache::with_clock(ttl, clock.clone()),
            flight: SingleFlight::new(),
            cooldown: chrono::Duration::from_std(cooldown).unwrap_or(chrono::Duration::zero()),
            cooldown_until: Mutex::new(None),
            clock,
        }
    }

    /// Fetch a report, serving from cache when fresh.
    ///
    /// Misses for the same key are coalesced: concurrent callers wait for
    /// one loader and then resolve from its stored result.
    pub async fn report(&self, query: &ReportQuery) -> Result<Report, Error> {
        let key = query.cache_key().to_string();

        self.flight
            .run(&key, || async {
                if let Some(hit) = self.cache.get(&key).await {
                    tracing::debug!("cache hit for {}", key);
                    return Ok(hit);
                }

                if let Some(retry_after_secs) = self.cooldown_remaining_secs() {
                    tracing::warn!("suppressing fetch for {}: rate-limit cooldown active", key);
                    return Err(Error::RateLimited { retry_after_secs });
                }

                match self.api.fetch(query).await {
                    Ok(report) => {
                        self.cache.set(&key, report.clone()).await;
                        Ok(report)
                    }
                    Err(ApiError::RateLimited) => {
                        let retry_after_secs = self.arm_cooldown();
                        tracing::warn!("rate limited; cooling down for {}s", retry_after_secs);
                        Err(Error::RateLimited { retry_after_secs })
                    }
                    Err(ApiError::InvalidQuery(msg)) => Err(Error::InvalidDate(msg)),
                    Err(e) => Err(Error::Api(e.to_string())),
                }
            })
            .await
    }

    /// Seconds left on the 429 cooldown, if one is active.
    pub fn cooldown_remaining_secs(&self) -> Option<u64> {
        let until = self.cooldown_until.lock().expect("cooldown state poisoned");
        let until = (*until)?;
        let remaining = until - self.clock.now();
        if remaining > chrono::Duration::zero() { Some(remaining.num_seconds().max(1) as u64) } else { None }
    }

    fn arm_cooldown(&self) -> u64 {
        let mut until = self.cooldown_until.lock().expect("cooldown state poisoned");
        *until = Some(self.clock.now() + self.cooldown);
        self.cooldown.num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use meup_core::select::DateRange;
    use meup_core::{ManualClock, ReportKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubApi {
        calls: AtomicUsize,
        fail_with: Mutex<Option<ApiError>>,
    }

    impl StubApi {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail_with: Mutex::new(None) }
        }

        fn set_failure(&self, err: Option<ApiError>) {
            *self.fail_with.lock().unwrap() = err;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ReportApi for Arc<StubApi> {
        async fn fetch(&self, _query: &ReportQuery) -> Result<Report, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(Report::default()),
            }
        }
    }

    fn query() -> ReportQuery {
        let d = |day| chrono::NaiveDate::from_ymd_opt(2024, 10, day).unwrap();
        ReportQuery::new(ReportKind::AdsOverview, DateRange::new(d(3), d(10)))
    }

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let api = Arc::new(StubApi::ok());
        let service =
            ReportService::with_clock(api.clone(), Duration::from_secs(300), Duration::from_secs(60), manual_clock());

        service.report(&query()).await.unwrap();
        service.report(&query()).await.unwrap();

        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_arms_cooldown() {
        let api = Arc::new(StubApi::ok());
        let clock = manual_clock();
        let service =
            ReportService::with_clock(api.clone(), Duration::from_secs(300), Duration::from_secs(60), clock.clone());

        api.set_failure(Some(ApiError::RateLimited));
        let err = service.report(&query()).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited { retry_after_secs: 60 }));
        assert_eq!(api.calls(), 1);

        // Within the cooldown window no further network attempt is made.
        let err = service.report(&query()).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited { .. }));
        assert_eq!(api.calls(), 1);

        // After the window passes, fetching resumes.
        clock.advance(Duration::from_secs(61));
        service.report(&query()).await.unwrap();
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_hits_served_during_cooldown() {
        let api = Arc::new(StubApi::ok());
        let clock = manual_clock();
        let service =
            ReportService::with_clock(api.clone(), Duration::from_secs(300), Duration::from_secs(60), clock.clone());

        // Prime the cache for one key, then trip the rate limit on another.
        service.report(&query()).await.unwrap();
        let other = {
            let d = |day| chrono::NaiveDate::from_ymd_opt(2024, 9, day).unwrap();
            ReportQuery::new(ReportKind::AdsOverview, DateRange::new(d(1), d(7)))
        };
        api.set_failure(Some(ApiError::RateLimited));
        service.report(&other).await.unwrap_err();

        // The primed key still resolves without touching the network.
        service.report(&query()).await.unwrap();
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_api_error_propagates_uncached() {
        let api = Arc::new(StubApi::ok());
        let service =
            ReportService::with_clock(api.clone(), Duration::from_secs(300), Duration::from_secs(60), manual_clock());

        api.set_failure(Some(ApiError::HttpError { status: 500 }));
        let err = service.report(&query()).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));

        // The failure was not cached; the next call retries the network.
        service.report(&query()).await.unwrap();
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalid_query_maps_to_invalid_date() {
        let api = Arc::new(StubApi::ok());
        let service =
            ReportService::with_clock(api.clone(), Duration::from_secs(300), Duration::from_secs(60), manual_clock());

        api.set_failure(Some(ApiError::InvalidQuery("expected YYYY-MM-DD, got \"10/03\"".into())));
        let err = service.report(&query()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
        assert!(err.to_string().starts_with("INVALID_DATE"));
    }

    #[tokio::test]
    async fn test_no_cooldown_initially() {
        let api = Arc::new(StubApi::ok());
        let service =
            ReportService::with_clock(api, Duration::from_secs(300), Duration::from_secs(60), manual_clock());
        assert_eq!(service.cooldown_remaining_secs(), None);
    }
}
