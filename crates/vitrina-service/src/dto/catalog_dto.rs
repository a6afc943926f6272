//! Catalog query and response DTOs.

use serde::{Deserialize, Serialize};
use vitrina_core::{CanonicalLocale, NormalizedCatalogRecord, Page, PageRequest};

/// A catalog listing request after locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub locale: CanonicalLocale,
    pub category: Option<String>,
    pub page: PageRequest,
    /// Skip the cache for this request.
    pub no_cache: bool,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(locale: CanonicalLocale, page: PageRequest) -> Self {
        Self {
            locale,
            category: None,
            page,
            no_cache: false,
        }
    }

    /// Restricts the listing to one category. Blank values mean "all".
    /// The name is trimmed and lower-cased, matching the cache key.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        self
    }

    #[must_use]
    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }
}

/// A single product request after locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub locale: CanonicalLocale,
    pub slug: String,
    pub no_cache: bool,
}

impl ProductQuery {
    #[must_use]
    pub fn new(locale: CanonicalLocale, slug: impl Into<String>) -> Self {
        Self {
            locale,
            slug: slug.into(),
            no_cache: false,
        }
    }
}

/// One localized, ordered page of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub locale: CanonicalLocale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub page: Page<NormalizedCatalogRecord>,
}
