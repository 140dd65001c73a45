//! Lexicon-ratio positivity scorer.

use praisecheck_core::Lexicon;

use crate::error::SentimentError;

/// Lowercases `text` and splits it on runs of whitespace.
///
/// Punctuation stays attached to its word, so `"great!"` is the token
/// `"great!"` and will not match a lexicon entry `"great"`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Fraction of the tokens of `text` that are lexicon entries, in `[0, 1]`.
///
/// Repeated tokens each count.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyText`] if `text` has no tokens.
pub fn score(text: &str, lexicon: &Lexicon) -> Result<f64, SentimentError> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(SentimentError::EmptyText);
    }
    let positives = tokens.iter().filter(|t| lexicon.contains(t)).count();

    #[allow(clippy::cast_precision_loss)]
    let ratio = positives as f64 / tokens.len() as f64;
    Ok(ratio)
}
