//! Page retrieval and markup tokenizing for praisecheck.
//!
//! [`HttpFetcher`] turns a URL into page text; [`MarkupLexer`] turns page
//! text into a flat stream of [`MarkupEvent`]s without building a tree.

pub mod error;
pub mod fetch;
pub mod markup;

pub use error::FetchError;
pub use fetch::{page_url, HttpFetcher, PageFetcher};
pub use markup::{MarkupEvent, MarkupLexer};
