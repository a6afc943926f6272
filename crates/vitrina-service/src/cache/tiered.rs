//! Remote-then-memory cache store.

use super::{CacheOutcome, CacheStore, MemoryStore, RemoteCache};
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use bytes::Bytes;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use vitrina_core::{VitrinaError, VitrinaResult};

/// Upper bound for one remote call before the memory store answers.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_millis(150);

/// Cache store that tries the remote backing and falls back to memory.
///
/// There is no circuit state: each call tries the remote again, so a
/// recovered Redis is used from the very next request.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct TieredCacheStore {
    remote: Option<Arc<dyn RemoteCache>>,
    memory: Arc<MemoryStore>,
    #[shaku(default = DEFAULT_REMOTE_TIMEOUT)]
    remote_timeout: Duration,
}

impl TieredCacheStore {
    #[must_use]
    pub fn new(
        remote: Option<Arc<dyn RemoteCache>>,
        memory: Arc<MemoryStore>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            remote,
            memory,
            remote_timeout,
        }
    }

    /// A store with no remote backing.
    #[must_use]
    pub fn memory_only(memory: Arc<MemoryStore>) -> Self {
        Self::new(None, memory, DEFAULT_REMOTE_TIMEOUT)
    }

    async fn call_remote<T>(
        &self,
        op: &'static str,
        key: &str,
        call: impl Future<Output = VitrinaResult<T>> + Send,
    ) -> Result<T, String> {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(VitrinaError::Timeout(format!(
                "Redis {} exceeded {}ms",
                op,
                self.remote_timeout.as_millis()
            ))),
        };
        CacheMetrics::remote_latency(op, started.elapsed());

        result.map_err(|e| {
            warn!(op, key, error = %e, "Remote cache failed, using in-process store");
            CacheMetrics::fallback(op);
            e.to_string()
        })
    }
}

#[async_trait]
impl CacheStore for TieredCacheStore {
    async fn get(&self, key: &str) -> CacheOutcome<Option<Bytes>> {
        let Some(remote) = &self.remote else {
            return CacheOutcome::memory(self.memory.get(key));
        };

        match self.call_remote("get", key, remote.get(key)).await {
            Ok(value) => CacheOutcome::remote(value),
            Err(reason) => CacheOutcome::fallback(self.memory.get(key), reason),
        }
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> CacheOutcome<()> {
        if ttl.is_zero() {
            debug!("Skipping store of '{}' with zero TTL", key);
            return match self.remote {
                Some(_) => CacheOutcome::remote(()),
                None => CacheOutcome::memory(()),
            };
        }

        let Some(remote) = &self.remote else {
            self.memory.set(key, value, ttl);
            return CacheOutcome::memory(());
        };

        match self.call_remote("set", key, remote.set(key, &value, ttl)).await {
            Ok(()) => CacheOutcome::remote(()),
            Err(reason) => {
                self.memory.set(key, value, ttl);
                CacheOutcome::fallback((), reason)
            }
        }
    }

    async fn del(&self, key: &str) -> CacheOutcome<()> {
        // A copy written during an earlier outage must not resurface later.
        self.memory.remove(key);

        let Some(remote) = &self.remote else {
            return CacheOutcome::memory(());
        };

        match self.call_remote("del", key, remote.del(key)).await {
            Ok(()) => CacheOutcome::remote(()),
            Err(reason) => CacheOutcome::fallback((), reason),
        }
    }
}

impl std::fmt::Debug for TieredCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredCacheStore")
            .field("remote", &self.remote.is_some())
            .field("remote_timeout", &self.remote_timeout)
            .finish_non_exhaustive()
    }
}
