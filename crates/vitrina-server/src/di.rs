//! Dependency injection module using Shaku.

use deadpool_redis::{PoolConfig, Runtime};
use shaku::module;
use std::sync::Arc;
use tracing::{info, warn};
use vitrina_config::AppConfig;
use vitrina_repository::{FileCatalogRepository, FileCatalogRepositoryParameters};
use vitrina_service::{
    CacheStore, CatalogService, CatalogServiceComponent, MemoryStore, RedisRemoteCache,
    RemoteCache, TieredCacheStore, TieredCacheStoreParameters,
};

// Single-process deployment: JSON catalog source, tiered response cache,
// catalog service.
module! {
    pub CatalogModule {
        components = [
            FileCatalogRepository,
            TieredCacheStore,
            CatalogServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the catalog module.
///
/// `memory` is the fallback store the caller also hands to the sweeper.
/// An unusable Redis URL or pool configuration leaves the cache running on
/// `memory` alone; it never fails startup.
#[must_use]
pub fn build_catalog_module(config: &AppConfig, memory: Arc<MemoryStore>) -> Arc<CatalogModule> {
    let remote = create_remote_cache(config);

    let module = CatalogModule::builder()
        .with_component_parameters::<FileCatalogRepository>(FileCatalogRepositoryParameters {
            path: config.catalog.source_path.clone().into(),
        })
        .with_component_parameters::<TieredCacheStore>(TieredCacheStoreParameters {
            remote,
            memory,
            remote_timeout: config.cache.remote_timeout(),
        })
        .build();

    Arc::new(module)
}

fn create_remote_cache(config: &AppConfig) -> Option<Arc<dyn RemoteCache>> {
    let url = config.cache.redis_url()?;

    let mut redis_cfg = deadpool_redis::Config::from_url(url);
    redis_cfg.pool = Some(PoolConfig::new(config.cache.pool_size.max(1)));

    match redis_cfg.create_pool(Some(Runtime::Tokio1)) {
        Ok(pool) => {
            info!("Redis response cache enabled");
            Some(Arc::new(RedisRemoteCache::new(Arc::new(pool))))
        }
        Err(e) => {
            warn!("Failed to create Redis pool, using in-process cache only: {}", e);
            None
        }
    }
}
