use crate::models::SearchCriteria;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with criteria recall operations
#[derive(Debug, Error)]
pub enum RecallError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No remembered criteria: {0}")]
    Empty(String),
}

/// Two-tier store for a member's last submitted search criteria.
///
/// This is a UI convenience only (pre-filling the next search form); it is
/// consulted and populated by the HTTP layer and never feeds the predicate
/// computation. L1 is in-memory, L2 is Redis shared across instances.
pub struct RecallStore {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl RecallStore {
    /// Create a new recall store
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, RecallError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Remember the criteria an account last searched with
    pub async fn remember(
        &self,
        account_id: &str,
        criteria: &SearchCriteria,
    ) -> Result<(), RecallError> {
        let key = RecallKey::criteria(account_id);
        let json = serde_json::to_string(criteria)?;

        self.l1_cache
            .insert(key.clone(), json.as_bytes().to_vec())
            .await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Remembered criteria for {}", account_id);
        Ok(())
    }

    /// Fetch the last remembered criteria for an account (L1 first, then L2)
    pub async fn recall(&self, account_id: &str) -> Result<SearchCriteria, RecallError> {
        let key = RecallKey::criteria(account_id);

        if let Some(bytes) = self.l1_cache.get(&key).await {
            tracing::trace!("Recall L1 hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("Recall L2 hit: {}", key);
            self.l1_cache
                .insert(key, json.as_bytes().to_vec())
                .await;
            return Ok(serde_json::from_str(&json)?);
        }

        Err(RecallError::Empty(account_id.to_string()))
    }

    /// Forget the remembered criteria for an account
    pub async fn forget(&self, account_id: &str) -> Result<(), RecallError> {
        let key = RecallKey::criteria(account_id);
        self.l1_cache.invalidate(&key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(&key)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }
}

/// Recall key builder
pub struct RecallKey;

impl RecallKey {
    pub fn criteria(account_id: &str) -> String {
        format!("recall:criteria:{}", account_id)
    }
}
