//! Cache store contract.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::time::Duration;
use vitrina_core::Interface;

/// Which backing answered a cache call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Remote,
    Memory,
}

impl CacheBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Memory => "memory",
        }
    }
}

/// Result of a cache call. Infrastructure failures never surface as errors;
/// when the remote failed and the memory store answered instead, `degraded`
/// holds the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome<T> {
    pub value: T,
    pub backend: CacheBackend,
    pub degraded: Option<String>,
}

impl<T> CacheOutcome<T> {
    /// Answered by the remote backing.
    pub fn remote(value: T) -> Self {
        Self {
            value,
            backend: CacheBackend::Remote,
            degraded: None,
        }
    }

    /// Answered by the memory store with no remote configured.
    pub fn memory(value: T) -> Self {
        Self {
            value,
            backend: CacheBackend::Memory,
            degraded: None,
        }
    }

    /// Answered by the memory store after the remote failed.
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            backend: CacheBackend::Memory,
            degraded: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Key/value store with TTL.
///
/// None of the operations can fail from the caller's point of view.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the live value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheOutcome<Option<Bytes>>;

    /// Stores `value` under `key` for `ttl`. A zero TTL stores nothing.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> CacheOutcome<()>;

    /// Removes `key`.
    async fn del(&self, key: &str) -> CacheOutcome<()>;
}
