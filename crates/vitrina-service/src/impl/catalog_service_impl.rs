//! Catalog service implementations.

use crate::catalog_service::CatalogService;
use crate::dto::{CatalogPage, CatalogQuery};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;
use vitrina_core::{
    normalize, normalize_all, sort_records, CanonicalLocale, NormalizedCatalogRecord, Page,
    RawCatalogRecord, VitrinaError, VitrinaResult,
};
use vitrina_repository::CatalogRepository;

/// Generic catalog service implementation (non-DI).
pub struct CatalogServiceImpl<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogServiceImpl<R> {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: CatalogRepository + 'static> CatalogService for CatalogServiceImpl<R> {
    async fn list_products(&self, query: &CatalogQuery) -> VitrinaResult<CatalogPage> {
        let records = fetch_for_query(self.repository.as_ref(), query).await?;
        Ok(assemble_page(&records, query))
    }

    async fn get_product(
        &self,
        slug: &str,
        locale: CanonicalLocale,
    ) -> VitrinaResult<NormalizedCatalogRecord> {
        find_product(self.repository.as_ref(), slug, locale).await
    }
}

/// Catalog service component for DI.
#[derive(Component)]
#[shaku(interface = CatalogService)]
pub struct CatalogServiceComponent {
    #[shaku(inject)]
    repository: Arc<dyn CatalogRepository>,
}

#[async_trait]
impl CatalogService for CatalogServiceComponent {
    async fn list_products(&self, query: &CatalogQuery) -> VitrinaResult<CatalogPage> {
        let records = fetch_for_query(self.repository.as_ref(), query).await?;
        Ok(assemble_page(&records, query))
    }

    async fn get_product(
        &self,
        slug: &str,
        locale: CanonicalLocale,
    ) -> VitrinaResult<NormalizedCatalogRecord> {
        find_product(self.repository.as_ref(), slug, locale).await
    }
}

impl std::fmt::Debug for CatalogServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServiceComponent").finish_non_exhaustive()
    }
}

async fn fetch_for_query<R: CatalogRepository + ?Sized>(
    repository: &R,
    query: &CatalogQuery,
) -> VitrinaResult<Vec<RawCatalogRecord>> {
    match query.category.as_deref() {
        Some(category) => repository.fetch_by_category(category).await,
        None => repository.fetch_all().await,
    }
}

/// Normalize, then order, then slice. Ordering happens before pagination so
/// page boundaries are stable across locales.
fn assemble_page(records: &[RawCatalogRecord], query: &CatalogQuery) -> CatalogPage {
    let ordered = sort_records(normalize_all(records, query.locale));
    debug!(
        "Assembled catalog for {} ({} records, category {:?})",
        query.locale,
        ordered.len(),
        query.category
    );

    CatalogPage {
        locale: query.locale,
        category: query.category.clone(),
        page: Page::slice(ordered, query.page),
    }
}

async fn find_product<R: CatalogRepository + ?Sized>(
    repository: &R,
    slug: &str,
    locale: CanonicalLocale,
) -> VitrinaResult<NormalizedCatalogRecord> {
    let raw = repository
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| VitrinaError::not_found("Product", slug.trim()))?;
    Ok(normalize(&raw, locale))
}
