//! Response caching.
//!
//! A [`TieredCacheStore`] tries Redis first and falls back to an in-process
//! [`MemoryStore`] per call, so an unreachable Redis degrades latency and
//! hit rate but never correctness. [`CachedQuery`] decorates read
//! operations on top of any [`CacheStore`].

pub mod cache_keys;
mod memory_store;
mod middleware;
mod redis_remote;
mod store;
mod tiered;

pub use memory_store::{spawn_sweeper, MemoryStore};
pub use middleware::{
    BypassFn, CachePolicy, CacheStatus, CachedBody, CachedQuery, KeyFn, OperationKind,
    DEFAULT_MAX_ENTRY_BYTES,
};
pub use redis_remote::{RedisRemoteCache, RemoteCache};
pub use store::{CacheBackend, CacheOutcome, CacheStore};
pub use tiered::{TieredCacheStore, TieredCacheStoreParameters, DEFAULT_REMOTE_TIMEOUT};
