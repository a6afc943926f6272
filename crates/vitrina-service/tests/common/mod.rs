//! Fake remote caches for exercising the tiered store.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use vitrina_core::{VitrinaError, VitrinaResult};
use vitrina_service::{MemoryStore, RemoteCache, TieredCacheStore};

/// A working remote that enforces TTLs against the tokio clock. Can be
/// switched into a failing state to simulate an outage.
#[derive(Default)]
pub struct HealthyRemote {
    entries: Mutex<HashMap<String, (Bytes, Instant)>>,
    down: AtomicBool,
    calls: AtomicUsize,
}

impl HealthyRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn put_raw(&self, key: &str, value: &'static [u8]) {
        self.entries.lock().insert(
            key.to_string(),
            (Bytes::from_static(value), Instant::now() + Duration::from_secs(3600)),
        );
    }

    fn check(&self) -> VitrinaResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            Err(VitrinaError::Cache("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteCache for HealthyRemote {
    async fn get(&self, key: &str) -> VitrinaResult<Option<Bytes>> {
        self.check()?;
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> VitrinaResult<()> {
        self.check()?;
        self.entries.lock().insert(
            key.to_string(),
            (Bytes::copy_from_slice(value), Instant::now() + ttl),
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> VitrinaResult<()> {
        self.check()?;
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// A remote that refuses every call.
pub struct FailingRemote;

#[async_trait]
impl RemoteCache for FailingRemote {
    async fn get(&self, _key: &str) -> VitrinaResult<Option<Bytes>> {
        Err(VitrinaError::Cache("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> VitrinaResult<()> {
        Err(VitrinaError::Cache("connection refused".to_string()))
    }

    async fn del(&self, _key: &str) -> VitrinaResult<()> {
        Err(VitrinaError::Cache("connection refused".to_string()))
    }
}

/// A remote that never answers.
pub struct HangingRemote;

#[async_trait]
impl RemoteCache for HangingRemote {
    async fn get(&self, _key: &str) -> VitrinaResult<Option<Bytes>> {
        std::future::pending().await
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> VitrinaResult<()> {
        std::future::pending().await
    }

    async fn del(&self, _key: &str) -> VitrinaResult<()> {
        std::future::pending().await
    }
}

pub const REMOTE_TIMEOUT: Duration = Duration::from_millis(50);

/// Builds a tiered store over `remote` and returns it with its memory store.
pub fn tiered(remote: Option<Arc<dyn RemoteCache>>) -> (Arc<TieredCacheStore>, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::new());
    let store = TieredCacheStore::new(remote, Arc::clone(&memory), REMOTE_TIMEOUT);
    (Arc::new(store), memory)
}
