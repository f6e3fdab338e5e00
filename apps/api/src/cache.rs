//! Key-value cache client shared by the job cache and the OTP store.
//!
//! `AppState` carries an `Arc<dyn CacheBackend>` built once at startup; the
//! Redis implementation opens a single multiplexed connection lazily and hands
//! out clones of it to concurrent callers.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache value could not be encoded: {0}")]
    Encode(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Atomically adds one to an integer counter, creating it at 1, and
    /// (re)sets its expiry. Returns the new value.
    async fn increment(&self, key: &str, ttl: Duration) -> Result<i64, CacheError>;
}

pub struct RedisCache {
    client: redis::Client,
    conn: OnceCell<MultiplexedConnection>,
}

impl RedisCache {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            conn: OnceCell::new(),
        }
    }

    /// A failed connect leaves the cell empty, so the next call retries.
    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.connection().await?;

        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Cache GET failed for key {key}: {e}");
                CacheError::from(e)
            })?;

        debug!(
            "Cache {}: {key}",
            if value.is_some() { "HIT" } else { "MISS" }
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        // SETEX rejects a zero expiry
        let ttl_secs = ttl.as_secs().max(1);
        let _: () = redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_secs)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Cache SET failed for key {key}: {e}");
                CacheError::from(e)
            })?;

        debug!("Cache SET: {key} (ttl {ttl_secs}s)");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let _: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Cache DEL failed for key {key}: {e}");
                CacheError::from(e)
            })?;

        Ok(())
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<i64, CacheError> {
        let mut conn = self.connection().await?;

        let ttl_secs = ttl.as_secs().max(1);
        let (count,): (i64,) = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(ttl_secs)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Cache INCR failed for key {key}: {e}");
                CacheError::from(e)
            })?;

        Ok(count)
    }
}
