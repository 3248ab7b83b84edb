//! Delimited text field normalisation.
//!
//! Corpus cells such as `"Headache; Nausea, fever"` become a `TokenSet` of
//! `{"fever", "headache", "nausea"}`. Parsing never fails: anything that does
//! not yield a token contributes nothing.

use std::collections::BTreeSet;

/// Cell values the corpus format uses to mean "no value".
const MISSING_SENTINELS: &[&str] = &["nan", "na", "n/a", "null", "<na>"];

/// Return true if `raw` is blank or one of the missing-value sentinels.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || MISSING_SENTINELS
            .iter()
            .any(|s| trimmed.eq_ignore_ascii_case(s))
}

/// A set of lowercase, trimmed, non-empty tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Parse a delimited corpus field.
    ///
    /// Semicolons are treated as commas, fragments are trimmed and
    /// lowercased, and empty fragments are dropped.
    pub fn parse(raw: &str) -> Self {
        if is_missing(raw) {
            return Self::default();
        }
        Self::from_items(raw.replace(';', ",").split(','))
    }

    /// Build a set from already separated items, such as a query's list fields.
    ///
    /// Items are not split further.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .map(|item| item.as_ref().trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `|A ∩ B| / |A ∪ B|`, or 0 when both sets are empty.
    ///
    /// Two empty sets carry no evidence of similarity, so they score 0
    /// rather than 1.
    pub fn jaccard(&self, other: &TokenSet) -> f64 {
        let intersection = self.0.intersection(&other.0).count();
        let union = self.0.len() + other.0.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}
