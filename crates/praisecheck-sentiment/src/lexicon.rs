//! Positive-word lexicon loading.

use praisecheck_core::Lexicon;
use praisecheck_scraper::PageFetcher;

use crate::error::SentimentError;

/// Fetches the lexicon document at `url` and parses it with [`parse_lexicon`].
///
/// # Errors
///
/// Returns [`SentimentError::Fetch`] if the document cannot be retrieved.
pub async fn load_lexicon<F: PageFetcher>(
    fetcher: &F,
    url: &str,
) -> Result<Lexicon, SentimentError> {
    let body = fetcher.fetch(url).await?;
    let lexicon = parse_lexicon(&body);

    let malformed = lexicon.iter().filter(|w| !is_well_formed_entry(w)).count();
    if malformed > 0 {
        tracing::warn!(url, malformed, "lexicon has entries that are not plain words");
    }
    tracing::info!(url, words = lexicon.len(), "loaded lexicon");

    Ok(lexicon)
}

/// Parses a one-term-per-line lexicon document.
///
/// The first line is a header and is always dropped. Of the rest, a line is
/// kept verbatim when it is non-empty and starts with an alphabetic character,
/// which filters out blank lines and `;` comment lines.
#[must_use]
pub fn parse_lexicon(text: &str) -> Lexicon {
    text.lines()
        .skip(1)
        .filter(|line| line.chars().next().is_some_and(char::is_alphabetic))
        .collect()
}

/// A lexicon entry is a plain alphabetic word or a compound containing `-` or `+`.
#[must_use]
pub fn is_well_formed_entry(word: &str) -> bool {
    word.chars().all(char::is_alphabetic) || word.contains('-') || word.contains('+')
}
