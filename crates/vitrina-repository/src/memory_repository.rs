//! Catalog source holding records in memory.

use crate::CatalogRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::atomic::{AtomicUsize, Ordering};
use vitrina_core::{RawCatalogRecord, VitrinaResult};

/// Serves a fixed set of records. Counts fetches so callers can verify how
/// often the upstream store was actually consulted.
#[derive(Component, Debug, Default)]
#[shaku(interface = CatalogRepository)]
pub struct InMemoryCatalogRepository {
    records: Vec<RawCatalogRecord>,
    fetches: AtomicUsize,
}

impl InMemoryCatalogRepository {
    /// Creates a repository over the given records.
    #[must_use]
    pub fn new(records: Vec<RawCatalogRecord>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of upstream fetches served so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn fetch_all(&self) -> VitrinaResult<Vec<RawCatalogRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, category: &str) -> RawCatalogRecord {
        RawCatalogRecord {
            slug: slug.to_string(),
            category: Some(category.to_string()),
            ..RawCatalogRecord::default()
        }
    }

    #[tokio::test]
    async fn test_category_filter_is_case_insensitive() {
        let repo = InMemoryCatalogRepository::new(vec![
            record("op-5", "Огнетушители"),
            record("hose", "Рукава"),
        ]);

        let found = repo.fetch_by_category("огнетушители").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "op-5");
        assert_eq!(repo.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_slug_lookup_folds_cyrillic_case() {
        let repo = InMemoryCatalogRepository::new(vec![record("ОП-5", "Огнетушители")]);

        let found = repo.find_by_slug(" оп-5 ").await.unwrap();
        assert_eq!(found.map(|r| r.slug).as_deref(), Some("ОП-5"));
        assert!(repo.find_by_slug("op-5").await.unwrap().is_none());
    }
}
