//! Catalog query string parameters.

use serde::Deserialize;
use vitrina_core::{CanonicalLocale, PageRequest};
use vitrina_service::{CatalogQuery, ProductQuery};

/// Query parameters for catalog listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub nocache: bool,
}

impl CatalogParams {
    /// Resolves the parameters into a service query.
    #[must_use]
    pub fn into_query(self, locale: CanonicalLocale, default_page_size: usize) -> CatalogQuery {
        let page = PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(default_page_size),
        );
        CatalogQuery::new(locale, page)
            .with_category(self.category)
            .with_no_cache(self.nocache)
    }
}

/// Query parameters for a single product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductParams {
    #[serde(default)]
    pub nocache: bool,
}

impl ProductParams {
    #[must_use]
    pub fn into_query(self, locale: CanonicalLocale, slug: String) -> ProductQuery {
        ProductQuery {
            no_cache: self.nocache,
            ..ProductQuery::new(locale, slug)
        }
    }
}
