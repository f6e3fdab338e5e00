//! Cache-aside access to job matching snapshots.
//!
//! Lookup order: cache → (miss, unreadable value, or read error) store → write back
//! with a fixed TTL. The write-back is best-effort: a cache outage leaves every
//! lookup going to the store. Concurrent cold lookups for the same job may each hit the
//! store; there is no single-flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::cache::{CacheBackend, CacheError};
use crate::matching::criteria::JobCriteria;
use crate::matching::MatchError;

/// Store of record for job postings.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fails with `MatchError::NotFound` when no job has this id.
    async fn load_job(&self, job_id: i64) -> Result<JobCriteria, MatchError>;
}

pub struct JobCache {
    backend: Arc<dyn CacheBackend>,
    store: Arc<dyn JobStore>,
    ttl: Duration,
    prefix: String,
}

impl JobCache {
    pub fn new(backend: Arc<dyn CacheBackend>, store: Arc<dyn JobStore>, ttl: Duration) -> Self {
        Self {
            backend,
            store,
            ttl,
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn key(&self, job_id: i64) -> String {
        if self.prefix.is_empty() {
            job_id.to_string()
        } else {
            format!("{}:{}", self.prefix, job_id)
        }
    }

    #[instrument(skip(self))]
    pub async fn get_or_load(&self, job_id: i64) -> Result<JobCriteria, MatchError> {
        let key = self.key(job_id);

        match self.backend.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<JobCriteria>(&bytes) {
                Ok(job) if job.id == job_id => {
                    debug!("Job {job_id} served from cache");
                    return Ok(job);
                }
                Ok(job) => warn!(
                    "Cached snapshot under key {key} belongs to job {}, reloading",
                    job.id
                ),
                Err(e) => warn!("Discarding undecodable snapshot for job {job_id}: {e}"),
            },
            Ok(None) => debug!("Job {job_id} not cached"),
            Err(e) => warn!("Job cache read failed, falling back to store: {e}"),
        }

        let job = self.store.load_job(job_id).await?;

        match self.write_back(&key, &job).await {
            Ok(()) => debug!("Job {job_id} loaded from store and cached for {:?}", self.ttl),
            Err(e) => warn!("Job {job_id} loaded from store but not cached: {e}"),
        }

        Ok(job)
    }

    async fn write_back(&self, key: &str, job: &JobCriteria) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(job).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.backend.set(key, &bytes, self.ttl).await
    }

    /// Drops the cached snapshot so the next lookup reads the store.
    pub async fn invalidate(&self, job_id: i64) -> Result<(), MatchError> {
        self.backend.delete(&self.key(job_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_job, CountingJobStore, MemoryCache};

    const TTL: Duration = Duration::from_secs(3600);

    fn cache_with(store: Arc<CountingJobStore>, backend: Arc<MemoryCache>) -> JobCache {
        JobCache::new(backend, store, TTL)
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        let jobs = cache_with(store.clone(), backend.clone());

        let first = jobs.get_or_load(42).await.unwrap();
        let second = jobs.get_or_load(42).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.calls(), 1);
        assert!(backend.contains("42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_reloaded_from_store() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        let jobs = JobCache::new(backend, store.clone(), Duration::from_secs(60));

        jobs.get_or_load(42).await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        jobs.get_or_load(42).await.unwrap();
        assert_eq!(store.calls(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        jobs.get_or_load(42).await.unwrap();
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_replaced() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.insert("42", b"{not json".to_vec());
        let jobs = cache_with(store.clone(), backend.clone());

        let job = jobs.get_or_load(42).await.unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(store.calls(), 1);

        // The rewritten entry is readable again.
        jobs.get_or_load(42).await.unwrap();
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_entry_for_another_job_is_not_trusted() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.insert("42", serde_json::to_vec(&sample_job(7)).unwrap());
        let jobs = cache_with(store.clone(), backend);

        let job = jobs.get_or_load(42).await.unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_job_is_not_found_and_not_cached() {
        let store = Arc::new(CountingJobStore::with_jobs([]));
        let backend = Arc::new(MemoryCache::default());
        let jobs = cache_with(store.clone(), backend.clone());

        let err = jobs.get_or_load(9).await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(9)));
        assert!(!backend.contains("9"));
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated_without_retry() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        store.fail_loads();
        let jobs = cache_with(store.clone(), Arc::new(MemoryCache::default()));

        let err = jobs.get_or_load(42).await.unwrap_err();
        assert!(matches!(err, MatchError::LoadFailure(_)));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_read_failure_falls_back_to_store() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.fail_reads();
        let jobs = cache_with(store.clone(), backend);

        assert_eq!(jobs.get_or_load(42).await.unwrap().id, 42);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_loaded_job() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.fail_writes();
        let jobs = cache_with(store.clone(), backend.clone());

        assert_eq!(jobs.get_or_load(42).await.unwrap().id, 42);
        assert!(!backend.contains("42"));

        // Nothing was cached, so the next lookup goes back to the store.
        jobs.get_or_load(42).await.unwrap();
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_outage_serves_every_lookup_from_store() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.fail_reads();
        backend.fail_writes();
        let jobs = cache_with(store.clone(), backend);

        for expected_calls in 1..=3 {
            let job = jobs.get_or_load(42).await.unwrap();
            assert_eq!(job, sample_job(42));
            assert_eq!(store.calls(), expected_calls);
        }
    }

    #[tokio::test]
    async fn test_invalidate_failure_is_cache_unavailable() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        backend.fail_writes();
        let jobs = cache_with(store, backend);

        let err = jobs.invalidate(42).await.unwrap_err();
        assert!(matches!(err, MatchError::CacheUnavailable(_)));
    }

    #[tokio::test]
    async fn test_prefix_and_invalidate() {
        let store = Arc::new(CountingJobStore::with_jobs([sample_job(42)]));
        let backend = Arc::new(MemoryCache::default());
        let jobs = cache_with(store.clone(), backend.clone()).with_prefix("job");

        jobs.get_or_load(42).await.unwrap();
        assert!(backend.contains("job:42"));

        jobs.invalidate(42).await.unwrap();
        assert!(!backend.contains("job:42"));

        jobs.get_or_load(42).await.unwrap();
        assert_eq!(store.calls(), 2);
    }
}
