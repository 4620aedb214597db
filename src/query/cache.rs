//! Query cache
//!
//! Results are stored per key together with their fetch state. Reads of the
//! same key are serialized so concurrent callers share one request, and
//! invalidation marks entries stale without dropping their data.

use super::key::QueryKey;
use crate::error::{format_error, Result};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

type Data = Arc<dyn Any + Send + Sync>;

/// Observable state of one cached query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub has_data: bool,
    /// A request for this key is in flight
    pub is_fetching: bool,
    pub is_stale: bool,
    /// Presentable message of the last failure; cleared by the next success
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueryState {
    /// First load: fetching with nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.is_fetching && !self.has_data
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

struct Entry {
    data: Option<Data>,
    fetched_at: Option<Instant>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    /// Bumped by every invalidation
    generation: u64,
    fetching: Arc<AtomicBool>,
    error: Option<String>,
    lock: Arc<Mutex<()>>,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            fetched_at: None,
            updated_at: None,
            invalidated: false,
            generation: 0,
            fetching: Arc::new(AtomicBool::new(false)),
            error: None,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn is_stale(&self, stale_time: Duration) -> bool {
        match self.fetched_at {
            Some(at) => self.invalidated || at.elapsed() >= stale_time,
            None => true,
        }
    }
}

/// Clears the in-flight flag of a key when its fetch ends or is dropped
struct FetchingGuard(Arc<AtomicBool>);

impl Drop for FetchingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Shared cache of query results
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Entry>>,
    stale_time: Duration,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_time", &self.stale_time)
            .finish_non_exhaustive()
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Return the cached value while fresh, otherwise run `fetcher` and cache its result
    ///
    /// Concurrent calls for one key wait for the first; they get its result
    /// when it succeeded. Failures are recorded on the key but never cached
    /// as data. A result whose key was invalidated while it was in flight is
    /// stored but stays stale.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(data) = self.fresh::<T>(&key).await {
            return Ok(data);
        }

        let lock = self.key_lock(&key).await;
        let _guard = lock.lock().await;

        if let Some(data) = self.fresh::<T>(&key).await {
            tracing::debug!("Query {} served by concurrent fetch", key);
            return Ok(data);
        }

        let (generation, fetching) = self.begin_fetch(&key).await;
        tracing::debug!("Fetching query {}", key);

        let result = fetcher().await;
        drop(fetching);

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        match result {
            Ok(value) => {
                let value = Arc::new(value);
                entry.data = Some(value.clone() as Data);
                entry.fetched_at = Some(Instant::now());
                entry.updated_at = Some(Utc::now());
                if entry.generation == generation {
                    entry.invalidated = false;
                } else {
                    tracing::debug!("Query {} was invalidated while fetching", key);
                }
                entry.error = None;
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("Query {} failed: {}", key, e);
                entry.error = Some(format_error(&e));
                Err(e)
            }
        }
    }

    /// Cached value of `key` whatever its freshness
    pub async fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        let data = entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    pub async fn state(&self, key: &QueryKey) -> Option<QueryState> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        Some(QueryState {
            has_data: entry.data.is_some(),
            is_fetching: entry.fetching.load(Ordering::SeqCst),
            is_stale: entry.is_stale(self.stale_time),
            error: entry.error.clone(),
            updated_at: entry.updated_at,
        })
    }

    /// Mark every entry under `prefix` stale; returns how many were marked
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                entry.generation += 1;
                count += 1;
            }
        }
        tracing::debug!("Invalidated {} queries under {}", count, prefix);
        count
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn fresh<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_stale(self.stale_time) {
            return None;
        }
        entry.data.clone()?.downcast::<T>().ok()
    }

    async fn key_lock(&self, key: &QueryKey) -> Arc<Mutex<()>> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .lock
            .clone()
    }

    /// Mark `key` in flight; returns its generation and the guard clearing the mark
    async fn begin_fetch(&self, key: &QueryKey) -> (u64, FetchingGuard) {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.fetching.store(true, Ordering::SeqCst);
        (entry.generation, FetchingGuard(entry.fetching.clone()))
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_STALE_TIME_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resource::Sort;
    use reqwest::StatusCode;
    use std::sync::atomic::AtomicUsize;

    fn key(id: &str) -> QueryKey {
        QueryKey::detail("product", id)
    }

    #[tokio::test]
    async fn test_fresh_value_is_served_from_cache() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .fetch(key("p1"), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error>("Regulator".to_string())
                })
                .await
                .unwrap();
            assert_eq!(*value, "Regulator");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            Ok::<_, Error>(calls.fetch_add(1, Ordering::SeqCst))
        };

        assert_eq!(*cache.fetch(key("p1"), fetch).await.unwrap(), 0);
        assert_eq!(cache.invalidate(&QueryKey::resource("product")).await, 1);
        assert!(cache.state(&key("p1")).await.unwrap().is_stale);
        assert_eq!(*cache.get::<usize>(&key("p1")).await.unwrap(), 0);
        assert_eq!(*cache.fetch(key("p1"), fetch).await.unwrap(), 1);
        assert!(!cache.state(&key("p1")).await.unwrap().is_stale);
    }

    #[tokio::test]
    async fn test_zero_stale_time_always_refetches() {
        let cache = QueryCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            cache
                .fetch(key("p1"), || async {
                    Ok::<_, Error>(calls.fetch_add(1, Ordering::SeqCst))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, Error>(vec![1, 2, 3])
        };

        let (a, b, c) = tokio::join!(
            cache.fetch(key("p1"), fetch),
            cache.fetch(key("p1"), fetch),
            cache.fetch(key("p1"), fetch),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(c.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_is_observable_and_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let err = cache
            .fetch(key("p1"), || async {
                Err::<String, _>(Error::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "database down".into(),
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        let state = cache.state(&key("p1")).await.unwrap();
        assert!(state.is_error());
        assert!(!state.has_data);
        assert!(!state.is_fetching);
        assert_eq!(state.error.as_deref(), Some("database down (500)"));

        let value = cache
            .fetch(key("p1"), || async { Ok::<_, Error>("ok".to_string()) })
            .await
            .unwrap();
        assert_eq!(*value, "ok");
        assert!(!cache.state(&key("p1")).await.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_invalidation_during_fetch_keeps_entry_stale() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let list = QueryKey::list("product", 1, 15, "", &Sort::asc("id"));

        let (first, marked) = tokio::join!(
            cache.fetch(list.clone(), || async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, Error>("rows-before-create".to_string())
            }),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                cache.invalidate(&QueryKey::lists("product")).await
            }
        );
        assert_eq!(*first.unwrap(), "rows-before-create");
        assert_eq!(marked, 1);

        let state = cache.state(&list).await.unwrap();
        assert!(state.is_stale);
        assert!(state.has_data);

        let next = cache
            .fetch(list.clone(), || async {
                Ok::<_, Error>("rows-after-create".to_string())
            })
            .await
            .unwrap();
        assert_eq!(*next, "rows-after-create");
        assert!(!cache.state(&list).await.unwrap().is_stale);
    }

    #[tokio::test]
    async fn test_dropped_fetch_clears_fetching() {
        let cache = QueryCache::new(Duration::from_secs(60));

        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            cache.fetch(key("p1"), || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, Error>(1u32)
            }),
        )
        .await;
        assert!(timed_out.is_err());

        let state = cache.state(&key("p1")).await.unwrap();
        assert!(!state.is_fetching);
        assert!(!state.is_loading());
        assert!(!state.has_data);

        let value = cache
            .fetch(key("p1"), || async { Ok::<_, Error>(2u32) })
            .await
            .unwrap();
        assert_eq!(*value, 2);
    }
}
