//! Per-key serialization of cache loads.
//!
//! [`ResponseCache::fetch_with`](super::ResponseCache::fetch_with) does not
//! deduplicate concurrent misses for one key; every caller runs its own
//! loader. Running the lookup inside [`SingleFlight::run`] closes that gap:
//! the first caller holds the key's lock while it loads and stores, and
//! every coalesced caller re-checks the cache after the leader finishes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

/// Serializes work per string key.
#[derive(Default)]
pub struct SingleFlight {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` while holding the lock for `key`.
    ///
    /// Callers racing on the same key wait for the current holder instead of
    /// starting their own work. `work` is expected to consult the shared
    /// cache first, so followers resolve from the leader's stored result.
    pub async fn run<T, F, Fut>(&self, key: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let entry = {
            let mut locks = self.locks.lock().expect("single-flight state poisoned");
            locks.entry(key.to_string()).or_default().clone()
        };

        let result = {
            let _guard = entry.lock().await;
            work().await
        };

        // Drop the map entry once nobody else is queued on it.
        let mut locks = self.locks.lock().expect("single-flight state poisoned");
        if let Some(existing) = locks.get(key)
            && Arc::strong_count(existing) == 2
        {
            locks.remove(key);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DEFAULT_TTL, ResponseCache};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_concurrent_same_key_loads_once() {
        let flight = Arc::new(SingleFlight::new());
        let cache = Arc::new(ResponseCache::new(DEFAULT_TTL));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let flight = flight.clone();
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                flight
                    .run("ads_2024-10-03_2024-10-10", || async {
                        cache
                            .fetch_with("ads_2024-10-03_2024-10-10", || async {
                                calls.fetch_add(1, Ordering::SeqCst);
                                tokio::time::sleep(Duration::from_millis(10)).await;
                                Ok::<_, String>("payload".to_string())
                            })
                            .await
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "payload");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_run_independently() {
        let flight = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let a = {
            let flight = flight.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                flight
                    .run("a", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        1u32
                    })
                    .await
            })
        };
        let b = {
            let flight = flight.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                flight
                    .run("b", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        2u32
                    })
                    .await
            })
        };

        assert_eq!(a.await.unwrap(), 1);
        assert_eq!(b.await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lock_map_is_cleaned_up() {
        let flight = SingleFlight::new();
        flight.run("k", || async {}).await;
        assert!(flight.locks.lock().unwrap().is_empty());
    }
}
