use praisecheck_scraper::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A review-text marker appeared before any author marker on the stream.
    #[error("review text found with no preceding author marker")]
    MalformedOrdering,

    #[error("cannot score text with no tokens")]
    EmptyText,
}
