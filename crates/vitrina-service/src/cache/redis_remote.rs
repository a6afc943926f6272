//! Remote cache backing.

use async_trait::async_trait;
use bytes::Bytes;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vitrina_core::{VitrinaError, VitrinaResult};

/// The primary, network-reachable cache.
///
/// Implementations report every failure as an error; the tiered store
/// decides how to degrade.
#[async_trait]
pub trait RemoteCache: Send + Sync {
    async fn get(&self, key: &str) -> VitrinaResult<Option<Bytes>>;

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> VitrinaResult<()>;

    async fn del(&self, key: &str) -> VitrinaResult<()>;
}

/// Redis backing over a `deadpool-redis` pool.
#[derive(Clone)]
pub struct RedisRemoteCache {
    pool: Arc<Pool>,
}

impl RedisRemoteCache {
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// `SET EX` takes whole seconds; anything shorter than a second is
    /// stored for one.
    #[must_use]
    pub fn expiry_secs(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }

    async fn get_conn(&self) -> VitrinaResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| VitrinaError::cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl RemoteCache for RedisRemoteCache {
    async fn get(&self, key: &str) -> VitrinaResult<Option<Bytes>> {
        let mut conn = self.get_conn().await?;
        let value: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|e| VitrinaError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(value.map(Bytes::from))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> VitrinaResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = Self::expiry_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| VitrinaError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Stored key '{}' in Redis with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn del(&self, key: &str) -> VitrinaResult<()> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| VitrinaError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}' from Redis: {}", key, deleted > 0);
        Ok(())
    }
}

impl std::fmt::Debug for RedisRemoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRemoteCache").finish_non_exhaustive()
    }
}
