//! Catalog service trait definition.

use crate::dto::{CatalogPage, CatalogQuery};
use async_trait::async_trait;
use vitrina_core::{CanonicalLocale, Interface, NormalizedCatalogRecord, VitrinaResult};

/// Assembles localized catalog views from the upstream repository.
#[async_trait]
pub trait CatalogService: Interface + Send + Sync {
    /// Lists one page of the catalog, normalized to the query locale and in
    /// catalog display order.
    async fn list_products(&self, query: &CatalogQuery) -> VitrinaResult<CatalogPage>;

    /// Gets one product by slug, normalized to `locale`.
    async fn get_product(
        &self,
        slug: &str,
        locale: CanonicalLocale,
    ) -> VitrinaResult<NormalizedCatalogRecord>;
}
