use std::collections::HashSet;

use serde::Serialize;

/// Positivity index carried by a review that has not been scored yet.
pub const UNSCORED: f64 = -1.0;

/// One customer review recovered from a review page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    /// Reviewer display name with the list-marker prefix removed.
    pub author: String,
    /// Review body exactly as it appeared in the page markup.
    #[serde(rename = "text")]
    pub raw_text: String,
    /// Fraction of tokens found in the lexicon, in `[0, 1]`. [`UNSCORED`] until scored.
    pub positive_index: f64,
}

impl Review {
    /// A review whose author has been seen but whose text has not.
    #[must_use]
    pub fn pending(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            raw_text: String::new(),
            positive_index: UNSCORED,
        }
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.positive_index >= 0.0
    }
}

/// The reference set of positive words.
///
/// Loaded once per run and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Exact tag name and attribute list identifying a structural region of a page.
///
/// Matching is strict: the attribute list must equal the signature's list
/// pair-for-pair, in order. Extra, missing, or reordered attributes do not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSignature {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl MarkerSignature {
    /// Signature for `<tag class="value">` with no other attributes.
    #[must_use]
    pub fn class(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: vec![("class".to_owned(), value.to_owned())],
        }
    }

    #[must_use]
    pub fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        self.tag == tag && self.attributes.as_slice() == attributes
    }
}
