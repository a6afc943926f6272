//! Cache key generators for consistent key naming.

use vitrina_core::{CanonicalLocale, PageRequest};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "vitrina:cache";

/// Key for one page of the catalog listing.
#[must_use]
pub fn catalog_list(locale: CanonicalLocale, category: Option<&str>, page: PageRequest) -> String {
    format!(
        "{}:catalog:list:{}:{}:{}:{}",
        CACHE_PREFIX,
        locale,
        category_segment(category),
        page.page,
        page.size
    )
}

/// Key for one localized product. The slug is folded the same way
/// `CatalogRepository::find_by_slug` compares it.
#[must_use]
pub fn product(locale: CanonicalLocale, slug: &str) -> String {
    format!(
        "{}:catalog:product:{}:{}",
        CACHE_PREFIX,
        locale,
        slug.trim().to_lowercase()
    )
}

/// Unfiltered listings use `*`; filtered ones are tagged `cat=` so no
/// category name can produce the unfiltered segment.
fn category_segment(category: Option<&str>) -> String {
    category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .map_or_else(|| "*".to_string(), |c| format!("cat={c}"))
}
