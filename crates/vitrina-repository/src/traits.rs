//! Repository trait definitions.

use async_trait::async_trait;
use vitrina_core::{Interface, RawCatalogRecord, VitrinaResult};

/// Read access to raw catalog records.
#[async_trait]
pub trait CatalogRepository: Interface + Send + Sync {
    /// Fetches every record, in upstream order.
    async fn fetch_all(&self) -> VitrinaResult<Vec<RawCatalogRecord>>;

    /// Fetches the records of one category (case-insensitive).
    async fn fetch_by_category(&self, category: &str) -> VitrinaResult<Vec<RawCatalogRecord>> {
        let wanted = category.trim().to_lowercase();
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|record| {
                record
                    .category
                    .as_deref()
                    .is_some_and(|c| c.trim().to_lowercase() == wanted)
            })
            .collect())
    }

    /// Finds one record by slug (case-insensitive, Unicode-aware).
    async fn find_by_slug(&self, slug: &str) -> VitrinaResult<Option<RawCatalogRecord>> {
        let wanted = slug.trim().to_lowercase();
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .find(|record| record.slug.trim().to_lowercase() == wanted))
    }
}
