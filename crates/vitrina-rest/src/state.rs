//! Application state for Axum handlers.

use shaku::{HasComponent, Module};
use std::sync::Arc;
use vitrina_config::{CacheConfig, CatalogConfig};
use vitrina_service::{
    cache_keys, CachePolicy, CacheStore, CachedQuery, CatalogQuery, CatalogService, ProductQuery,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub catalog_cache: Arc<CachedQuery<CatalogQuery>>,
    pub product_cache: Arc<CachedQuery<ProductQuery>>,
    pub default_page_size: usize,
}

impl AppState {
    /// Creates a new application state, building the cache policies for
    /// catalog listings and products from `cache`.
    pub fn new(
        catalog_service: Arc<dyn CatalogService>,
        cache_store: Arc<dyn CacheStore>,
        cache: &CacheConfig,
        catalog: &CatalogConfig,
    ) -> Self {
        let catalog_policy = CachePolicy::new(cache.catalog_ttl(), |q: &CatalogQuery| {
            cache_keys::catalog_list(q.locale, q.category.as_deref(), q.page)
        })
        .with_bypass(|q: &CatalogQuery| q.no_cache)
        .with_max_entry_bytes(cache.max_entry_bytes);

        let product_policy = CachePolicy::new(cache.product_ttl(), |q: &ProductQuery| {
            cache_keys::product(q.locale, &q.slug)
        })
        .with_bypass(|q: &ProductQuery| q.no_cache)
        .with_max_entry_bytes(cache.max_entry_bytes);

        Self {
            catalog_service,
            catalog_cache: Arc::new(CachedQuery::new(Arc::clone(&cache_store), catalog_policy)),
            product_cache: Arc::new(CachedQuery::new(cache_store, product_policy)),
            default_page_size: catalog.default_page_size,
        }
    }

    /// Creates the state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M, cache: &CacheConfig, catalog: &CatalogConfig) -> Self
    where
        M: Module + HasComponent<dyn CatalogService> + HasComponent<dyn CacheStore>,
    {
        let catalog_service: Arc<dyn CatalogService> = module.resolve();
        let cache_store: Arc<dyn CacheStore> = module.resolve();
        Self::new(catalog_service, cache_store, cache, catalog)
    }
}
