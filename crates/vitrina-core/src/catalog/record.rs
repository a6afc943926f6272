//! Raw and normalized catalog records.

use crate::locale::{CanonicalLocale, Localized};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One translation row attached to a raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Locale label as stored upstream (`ru`, `en`, `eng`, `uz`, `uzb`, ...).
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Localized for Translation {
    fn locale_label(&self) -> &str {
        &self.locale
    }
}

/// A spec value as stored upstream: either a plain value or a per-locale map.
///
/// An object counts as a per-locale map only when at least one key is a
/// locale label; any other object is kept whole as its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SpecValue {
    Scalar(String),
    LocalizedMap(BTreeMap<String, String>),
}

impl From<Value> for SpecValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) if map.keys().any(|k| CanonicalLocale::is_known_label(k)) => {
                Self::LocalizedMap(
                    map.into_iter()
                        .map(|(locale, inner)| (locale, stringify(inner)))
                        .collect(),
                )
            }
            other => Self::Scalar(stringify(other)),
        }
    }
}

impl From<SpecValue> for Value {
    fn from(value: SpecValue) -> Self {
        match value {
            SpecValue::Scalar(text) => Value::String(text),
            SpecValue::LocalizedMap(map) => Value::Object(
                map.into_iter()
                    .map(|(locale, text)| (locale, Value::String(text)))
                    .collect(),
            ),
        }
    }
}

/// Renders a JSON value as display text. Strings are taken verbatim and
/// `null` becomes empty; everything else uses its JSON form.
pub(crate) fn stringify(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A catalog entry as fetched from the upstream store.
///
/// `images` is kept as an untyped value because the store historically
/// wrote it as a JSON-encoded string, sometimes as a real array, and
/// sometimes as garbage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCatalogRecord {
    #[serde(default, deserialize_with = "id_from_value")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Option<Value>,
    #[serde(default)]
    pub specs: BTreeMap<String, SpecValue>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// Upstream ids are strings in newer rows and integers in older ones.
fn id_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(stringify)
}

/// A locale-flattened catalog entry, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCatalogRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    pub images: Vec<String>,
    pub specs: BTreeMap<String, String>,
}

impl NormalizedCatalogRecord {
    /// Locale-invariant text used to classify and order the record: the
    /// slug, else the id, else the title.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        [self.slug.as_str(), self.id.as_str()]
            .into_iter()
            .find(|text| !text.trim().is_empty())
            .unwrap_or(self.title.as_str())
    }
}
