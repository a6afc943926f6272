//! Catalog ordering.
//!
//! Every record is classified into a [`SortGroup`] (plus an optional numeric
//! size) from its locale-invariant sort key, then ordered by group priority
//! and a per-group rule. Translated text never drives ordering, so the same
//! catalog lists in the same order in every language.

use super::record::NormalizedCatalogRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Coarse catalog classification. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortGroup {
    /// Powder extinguishers.
    Op,
    /// Carbon dioxide extinguishers.
    Ou,
    /// Self-triggering powder modules.
    Mpp,
    Other,
    /// Recharge and refill services.
    Recharge,
}

/// Canonical powder-extinguisher sizes, in display order.
pub const OP_SIZE_ORDER: [f64; 14] = [
    2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 25.0, 30.0, 35.0, 40.0, 50.0, 70.0, 100.0,
];

/// How a classification rule inspects the sort key.
#[derive(Debug)]
pub enum Matcher {
    /// Matches when the pattern occurs anywhere; no size.
    Contains(Regex),
    /// Matches a leading token; capture group 1 is the numeric size.
    SizedPrefix(Regex),
}

/// One row of the classification table.
#[derive(Debug)]
pub struct GroupRule {
    pub group: SortGroup,
    pub matcher: Matcher,
}

/// Result of classifying one sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub group: SortGroup,
    pub size: Option<f64>,
}

fn sized_prefix(tokens: &str) -> Matcher {
    let pattern = format!(r"^\s*(?:{tokens})[\s\-_.]*(\d+(?:[.,]\d+)?)");
    Matcher::SizedPrefix(Regex::new(&pattern).expect("static sort pattern"))
}

static RULES: Lazy<Vec<GroupRule>> = Lazy::new(|| {
    vec![
        GroupRule {
            group: SortGroup::Recharge,
            matcher: Matcher::Contains(
                Regex::new(
                    r"перезаряд|perezaryad|recharg|qayta\s*zaryad|заправк|zapravk|refill|to['ʻ’]?ldirish",
                )
                .expect("static sort pattern"),
            ),
        },
        GroupRule {
            group: SortGroup::Op,
            matcher: sized_prefix("оп|op"),
        },
        GroupRule {
            group: SortGroup::Ou,
            matcher: sized_prefix("оу|ou"),
        },
        GroupRule {
            group: SortGroup::Mpp,
            matcher: sized_prefix("мпп|mpp"),
        },
    ]
});

/// The ordered classification table. The first matching rule wins; keys
/// matching no rule fall into [`SortGroup::Other`].
#[must_use]
pub fn rules() -> &'static [GroupRule] {
    &RULES
}

/// Classifies a locale-invariant sort key.
#[must_use]
pub fn classify(key: &str) -> Classification {
    let text = key.to_lowercase();

    for rule in rules() {
        match &rule.matcher {
            Matcher::Contains(re) if re.is_match(&text) => {
                return Classification {
                    group: rule.group,
                    size: None,
                };
            }
            Matcher::SizedPrefix(re) => {
                if let Some(caps) = re.captures(&text) {
                    return Classification {
                        group: rule.group,
                        size: caps
                            .get(1)
                            .and_then(|m| m.as_str().replace(',', ".").parse().ok()),
                    };
                }
            }
            Matcher::Contains(_) => {}
        }
    }

    Classification {
        group: SortGroup::Other,
        size: None,
    }
}

/// Sorts records into catalog display order.
///
/// The ordering is total over distinct sort keys, so the output does not
/// depend on input order, and sorting a sorted list leaves it unchanged.
#[must_use]
pub fn sort_records(records: Vec<NormalizedCatalogRecord>) -> Vec<NormalizedCatalogRecord> {
    let mut keyed: Vec<(Classification, NormalizedCatalogRecord)> = records
        .into_iter()
        .map(|record| (classify(record.sort_key()), record))
        .collect();

    keyed.sort_by(|(ca, a), (cb, b)| compare(*ca, a, *cb, b));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare(
    ca: Classification,
    a: &NormalizedCatalogRecord,
    cb: Classification,
    b: &NormalizedCatalogRecord,
) -> Ordering {
    ca.group
        .cmp(&cb.group)
        .then_with(|| match ca.group {
            SortGroup::Op => op_rank(ca.size).cmp(&op_rank(cb.size)),
            SortGroup::Ou | SortGroup::Mpp => compare_size(ca.size, cb.size),
            SortGroup::Other | SortGroup::Recharge => Ordering::Equal,
        })
        .then_with(|| natural_cmp(a.sort_key(), b.sort_key()))
        .then_with(|| natural_cmp(&a.id, &b.id))
        .then_with(|| a.title.cmp(&b.title))
}

/// Position in [`OP_SIZE_ORDER`]; unlisted or missing sizes rank last.
fn op_rank(size: Option<f64>) -> usize {
    size.and_then(|s| {
        OP_SIZE_ORDER
            .iter()
            .position(|listed| (listed - s).abs() < f64::EPSILON)
    })
    .unwrap_or(OP_SIZE_ORDER.len())
}

fn compare_size(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares strings with embedded numbers by value, so `op-5` sorts before
/// `op-10`. Non-digit runs compare case-insensitively; the raw strings
/// break any remaining tie.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (Chunks::new(a), Chunks::new(b));

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => {
                        let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
                    }
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits { Chunk::Digits(chunk) } else { Chunk::Text(chunk) })
    }
}
