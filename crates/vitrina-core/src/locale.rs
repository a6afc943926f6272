//! Locale resolution.
//!
//! The site speaks three languages. Locale tokens arrive from cookies, query
//! strings and headers, and the upstream store labels translations with a
//! mix of two- and three-letter codes, so every lookup goes through
//! [`CanonicalLocale::resolve`] and matches stored labels against
//! [`CanonicalLocale::alias_chain`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three first-class site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalLocale {
    /// Russian, the universal fallback.
    #[default]
    Ru,
    /// English.
    En,
    /// Uzbek.
    Uz,
}

impl CanonicalLocale {
    /// Every canonical locale, in display order.
    pub const ALL: [Self; 3] = [Self::Ru, Self::En, Self::Uz];

    /// Normalizes a raw locale token.
    ///
    /// Tokens starting with `en` (covers `eng`, `en-US`) resolve to English,
    /// tokens starting with `uz` (covers `uzb`, `uz-Latn`) to Uzbek; anything
    /// else, including empty input, resolves to Russian.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        let token = raw.trim().to_lowercase();
        if token.starts_with("en") {
            Self::En
        } else if token.starts_with("uz") {
            Self::Uz
        } else {
            Self::Ru
        }
    }

    /// Resolves an optional token, defaulting to Russian when absent.
    #[must_use]
    pub fn resolve_opt(raw: Option<&str>) -> Self {
        raw.map_or(Self::Ru, Self::resolve)
    }

    /// Labels that identify a stored translation as belonging to this locale.
    #[must_use]
    pub const fn alias_chain(self) -> &'static [&'static str] {
        match self {
            Self::Ru => &["ru"],
            Self::En => &["en", "eng"],
            Self::Uz => &["uz", "uzb"],
        }
    }

    /// Whether a stored label belongs to any supported locale.
    #[must_use]
    pub fn is_known_label(label: &str) -> bool {
        Self::ALL.iter().any(|locale| locale.matches(label))
    }

    /// Whether a stored locale label belongs to this locale.
    #[must_use]
    pub fn matches(self, label: &str) -> bool {
        let label = label.trim();
        self.alias_chain()
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(label))
    }

    /// The canonical two-letter code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Uz => "uz",
        }
    }
}

impl fmt::Display for CanonicalLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalLocale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(s))
    }
}

/// Something carrying a locale label, such as a translation row.
pub trait Localized {
    /// The raw locale label as stored upstream.
    fn locale_label(&self) -> &str;
}

/// Picks the best entry for `locale` out of `items`.
///
/// Precedence: the first entry whose label is in the locale's alias chain,
/// then the first Russian entry, then the first entry in original order.
/// Returns `None` only when `items` is empty; the caller then falls back to
/// the record slug.
pub fn pick_localized<T: Localized>(items: &[T], locale: CanonicalLocale) -> Option<&T> {
    items
        .iter()
        .find(|item| locale.matches(item.locale_label()))
        .or_else(|| {
            items
                .iter()
                .find(|item| CanonicalLocale::Ru.matches(item.locale_label()))
        })
        .or_else(|| items.first())
}
