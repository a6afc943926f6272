//! Locale projection of raw catalog records.
//!
//! Normalization never fails: malformed image lists and odd spec shapes are
//! data, not errors, and come out as empty or stringified values.

use super::record::{NormalizedCatalogRecord, RawCatalogRecord, SpecValue};
use crate::locale::{pick_localized, CanonicalLocale};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Projects a raw record onto one locale.
#[must_use]
pub fn normalize(raw: &RawCatalogRecord, locale: CanonicalLocale) -> NormalizedCatalogRecord {
    let translation = pick_localized(&raw.translations, locale);

    let title = translation
        .and_then(|t| non_blank(t.title.as_deref()))
        .unwrap_or_else(|| raw.slug.clone());

    NormalizedCatalogRecord {
        id: raw.id.clone(),
        slug: raw.slug.clone(),
        title,
        summary: translation.and_then(|t| non_blank(t.summary.as_deref())),
        description: translation.and_then(|t| non_blank(t.description.as_deref())),
        category: raw.category.clone(),
        price: raw.price,
        images: parse_images(raw.images.as_ref()),
        specs: project_specs(&raw.specs, locale),
    }
}

/// Normalizes a batch of records at the same locale.
#[must_use]
pub fn normalize_all(raw: &[RawCatalogRecord], locale: CanonicalLocale) -> Vec<NormalizedCatalogRecord> {
    raw.iter().map(|record| normalize(record, locale)).collect()
}

/// Extracts the image list, keeping string elements only.
///
/// Accepts a JSON-encoded string holding an array, or an array value. Any
/// other shape, and any parse failure, yields an empty list.
#[must_use]
pub fn parse_images(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => strings_only(items),
            Ok(_) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "Ignoring malformed images field");
                Vec::new()
            }
        },
        Some(Value::Array(items)) => strings_only(items.clone()),
        _ => Vec::new(),
    }
}

/// Flattens every spec value to a single string for `locale`.
#[must_use]
pub fn project_specs(
    specs: &BTreeMap<String, SpecValue>,
    locale: CanonicalLocale,
) -> BTreeMap<String, String> {
    specs
        .iter()
        .map(|(key, value)| (key.clone(), project_spec(value, locale)))
        .collect()
}

/// Picks the text of one spec value using the locale alias chain, then
/// Russian, then the first entry present.
#[must_use]
pub fn project_spec(value: &SpecValue, locale: CanonicalLocale) -> String {
    match value {
        SpecValue::Scalar(text) => text.clone(),
        SpecValue::LocalizedMap(map) => locale
            .alias_chain()
            .iter()
            .chain(CanonicalLocale::Ru.alias_chain())
            .find_map(|alias| {
                map.iter()
                    .find(|(label, _)| label.trim().eq_ignore_ascii_case(alias))
                    .map(|(_, text)| text)
            })
            .or_else(|| map.values().next())
            .cloned()
            .unwrap_or_default(),
    }
}

fn strings_only(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}
