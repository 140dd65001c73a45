//! Review extraction, positivity scoring, and ranking.
//!
//! Loads a positive-word lexicon, scans paginated review pages for author and
//! review-text markers, scores every review by the share of its tokens found
//! in the lexicon, and returns the most positive reviews first.

pub mod error;
pub mod extractor;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;

pub use error::SentimentError;
pub use extractor::{ExtractorState, ReviewExtractor, ReviewMarkers};
pub use lexicon::{is_well_formed_entry, load_lexicon, parse_lexicon};
pub use pipeline::{rank, run_review_ranking, ReviewPipeline};
pub use scorer::{score, tokenize};
