//! Catalog controller.

use crate::{
    extractors::{CatalogParams, ProductParams, RequestLocale},
    responses::{ok, ApiResult, AppError, CachedJson},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use vitrina_service::{CacheBackend, OperationKind};

/// Creates the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog).delete(invalidate_catalog))
        .route("/:slug", get(get_product))
}

/// Result of a cache invalidation.
#[derive(Debug, Serialize)]
pub struct InvalidationResponse {
    pub key: String,
    pub backend: CacheBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// List one page of the catalog.
async fn list_catalog(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<CatalogParams>,
) -> Result<CachedJson, AppError> {
    let query = params.into_query(locale, state.default_page_size);
    debug!("List catalog request: {:?}", query);

    let body = state
        .catalog_cache
        .execute(OperationKind::Read, &query, || {
            state.catalog_service.list_products(&query)
        })
        .await?;
    Ok(CachedJson(body))
}

/// Get one product by slug.
async fn get_product(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(slug): Path<String>,
    Query(params): Query<ProductParams>,
) -> Result<CachedJson, AppError> {
    debug!("Get product request: {}", slug);
    let query = params.into_query(locale, slug);

    let body = state
        .product_cache
        .execute(OperationKind::Read, &query, || {
            state.catalog_service.get_product(&query.slug, query.locale)
        })
        .await?;
    Ok(CachedJson(body))
}

/// Drop the cached copy of one catalog page.
async fn invalidate_catalog(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<CatalogParams>,
) -> ApiResult<InvalidationResponse> {
    let query = params.into_query(locale, state.default_page_size);
    let key = state.catalog_cache.key_for(&query);

    let outcome = state.catalog_cache.invalidate(&query).await;
    if outcome.is_degraded() {
        warn!("Invalidated catalog cache key '{}' in the fallback store only", key);
    } else {
        info!("Invalidated catalog cache key '{}'", key);
    }

    ok(InvalidationResponse {
        key,
        backend: outcome.backend,
        degraded: outcome.degraded,
    })
}
