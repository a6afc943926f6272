//! Read-through caching for query operations.

use super::CacheStore;
use crate::metrics::CacheMetrics;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use vitrina_core::VitrinaResult;

/// Serialized results above this size are served but not stored.
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 1024 * 1024;

/// Derives the cache key of a query.
pub type KeyFn<Q> = Arc<dyn Fn(&Q) -> String + Send + Sync>;

/// Decides whether a query skips the cache.
pub type BypassFn<Q> = Arc<dyn Fn(&Q) -> bool + Send + Sync>;

/// Whether an operation is safe to serve from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Read,
    Mutation,
}

/// How a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStatus {
    Hit,
    Miss,
    Bypass,
}

impl CacheStatus {
    /// Value of the `x-cache` response header.
    #[must_use]
    pub const fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }

    /// Metric label.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Bypass => "bypass",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_header_value())
    }
}

/// Serialized JSON response body with its cache annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBody {
    pub body: Bytes,
    pub status: CacheStatus,
}

/// Caching rules for one kind of query.
pub struct CachePolicy<Q> {
    pub ttl: Duration,
    pub key_fn: KeyFn<Q>,
    pub bypass_fn: Option<BypassFn<Q>>,
    pub max_entry_bytes: usize,
}

impl<Q> CachePolicy<Q> {
    pub fn new(ttl: Duration, key_fn: impl Fn(&Q) -> String + Send + Sync + 'static) -> Self {
        Self {
            ttl,
            key_fn: Arc::new(key_fn),
            bypass_fn: None,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }

    #[must_use]
    pub fn with_bypass(mut self, bypass_fn: impl Fn(&Q) -> bool + Send + Sync + 'static) -> Self {
        self.bypass_fn = Some(Arc::new(bypass_fn));
        self
    }

    #[must_use]
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: usize) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    fn bypasses(&self, query: &Q) -> bool {
        self.bypass_fn.as_ref().is_some_and(|bypass| bypass(query))
    }
}

impl<Q> Clone for CachePolicy<Q> {
    fn clone(&self) -> Self {
        Self {
            ttl: self.ttl,
            key_fn: Arc::clone(&self.key_fn),
            bypass_fn: self.bypass_fn.clone(),
            max_entry_bytes: self.max_entry_bytes,
        }
    }
}

impl<Q> fmt::Debug for CachePolicy<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachePolicy")
            .field("ttl", &self.ttl)
            .field("bypass", &self.bypass_fn.is_some())
            .field("max_entry_bytes", &self.max_entry_bytes)
            .finish_non_exhaustive()
    }
}

/// Decorates query operations with read-through caching.
///
/// Only successful results are stored; a failing operation propagates its
/// error and leaves the cache untouched, so the next identical call runs
/// the operation again.
pub struct CachedQuery<Q> {
    store: Arc<dyn CacheStore>,
    policy: CachePolicy<Q>,
}

impl<Q> CachedQuery<Q> {
    pub fn new(store: Arc<dyn CacheStore>, policy: CachePolicy<Q>) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> &CachePolicy<Q> {
        &self.policy
    }

    /// The key `query` is cached under.
    pub fn key_for(&self, query: &Q) -> String {
        (self.policy.key_fn)(query)
    }

    /// Runs `op` for `query`, serving and filling the cache where allowed.
    ///
    /// Mutations and bypassed queries always run `op`. A stored entry that
    /// no longer parses as `T` counts as a miss and is overwritten.
    pub async fn execute<T, F, Fut>(
        &self,
        kind: OperationKind,
        query: &Q,
        op: F,
    ) -> VitrinaResult<CachedBody>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = VitrinaResult<T>>,
    {
        if kind == OperationKind::Mutation || self.policy.bypasses(query) {
            let body = Bytes::from(serde_json::to_vec(&op().await?)?);
            CacheMetrics::lookup(CacheStatus::Bypass);
            return Ok(CachedBody {
                body,
                status: CacheStatus::Bypass,
            });
        }

        let key = self.key_for(query);

        if let Some(stored) = self.store.get(&key).await.value {
            match serde_json::from_slice::<T>(&stored) {
                Ok(_) => {
                    debug!("Cache hit for key '{}'", key);
                    CacheMetrics::lookup(CacheStatus::Hit);
                    return Ok(CachedBody {
                        body: stored,
                        status: CacheStatus::Hit,
                    });
                }
                Err(e) => warn!(key = %key, error = %e, "Discarding unreadable cache entry"),
            }
        } else {
            debug!("Cache miss for key '{}'", key);
        }

        let body = Bytes::from(serde_json::to_vec(&op().await?)?);

        if body.len() > self.policy.max_entry_bytes {
            warn!(
                key = %key,
                size = body.len(),
                limit = self.policy.max_entry_bytes,
                "Result too large to cache, serving uncached"
            );
        } else {
            self.store.set(&key, body.clone(), self.policy.ttl).await;
        }

        CacheMetrics::lookup(CacheStatus::Miss);
        Ok(CachedBody {
            body,
            status: CacheStatus::Miss,
        })
    }

    /// Drops the cached entry for `query`.
    pub async fn invalidate(&self, query: &Q) -> super::CacheOutcome<()> {
        let key = self.key_for(query);
        debug!("Invalidating cache key '{}'", key);
        self.store.del(&key).await
    }
}

impl<Q> fmt::Debug for CachedQuery<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedQuery")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
