//! Streaming review extractor.
//!
//! Reacts to [`MarkupEvent`]s from review pages and recognizes two markers: an
//! author `span` and a review-text `p`, each identified by an exact
//! [`MarkerSignature`]. An author marker whose text starts with the list-marker
//! prefix opens a pending [`Review`]; text inside the next review marker
//! completes it, scores it, and emits it.
//!
//! All mutable scanning state lives in [`ExtractorState`], which the caller
//! owns and passes in for every page. A page that ends inside a marker, or
//! with an author captured but no text yet, carries that state into the next
//! page.

use praisecheck_core::{
    AppConfig, Lexicon, MarkerSignature, Review, DEFAULT_AUTHOR_CLASS, DEFAULT_AUTHOR_PREFIX,
    DEFAULT_REVIEW_CLASS,
};
use praisecheck_scraper::{MarkupEvent, MarkupLexer};

use crate::error::SentimentError;
use crate::scorer::score;

/// The structural markers identifying reviews in page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMarkers {
    pub author: MarkerSignature,
    pub review: MarkerSignature,
    /// Author text must start with this prefix; its characters are then
    /// trimmed from the start of the name.
    pub author_prefix: String,
}

impl ReviewMarkers {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            author: config.author_marker.clone(),
            review: config.review_marker.clone(),
            author_prefix: config.author_prefix.clone(),
        }
    }
}

impl Default for ReviewMarkers {
    fn default() -> Self {
        Self {
            author: MarkerSignature::class("span", DEFAULT_AUTHOR_CLASS),
            review: MarkerSignature::class("p", DEFAULT_REVIEW_CLASS),
            author_prefix: DEFAULT_AUTHOR_PREFIX.to_owned(),
        }
    }
}

/// Scanner state carried across events and pages.
#[derive(Debug, Clone, Default)]
pub struct ExtractorState {
    in_author_span: bool,
    in_review_paragraph: bool,
    pending: Option<Review>,
    lexer: MarkupLexer,
}

impl ExtractorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_author_span(&self) -> bool {
        self.in_author_span
    }

    #[must_use]
    pub fn in_review_paragraph(&self) -> bool {
        self.in_review_paragraph
    }

    /// The review whose author has been captured, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Review> {
        self.pending.as_ref()
    }
}

/// Turns markup into scored [`Review`]s.
#[derive(Debug, Clone)]
pub struct ReviewExtractor<'a> {
    markers: ReviewMarkers,
    lexicon: &'a Lexicon,
}

impl<'a> ReviewExtractor<'a> {
    #[must_use]
    pub fn new(markers: ReviewMarkers, lexicon: &'a Lexicon) -> Self {
        Self { markers, lexicon }
    }

    /// Tokenizes one page's raw markup and handles every resulting event.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_event`].
    pub fn feed_page(
        &self,
        state: &mut ExtractorState,
        page: &str,
    ) -> Result<Vec<Review>, SentimentError> {
        let events = state.lexer.feed(page);
        self.handle_events(state, &events)
    }

    /// Flushes text still buffered in the tokenizer at the end of the stream.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_event`].
    pub fn finish(&self, state: &mut ExtractorState) -> Result<Vec<Review>, SentimentError> {
        let events = state.lexer.finish();
        self.handle_events(state, &events)
    }

    /// Handles a batch of events in order, collecting completed reviews.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_event`].
    pub fn handle_events(
        &self,
        state: &mut ExtractorState,
        events: &[MarkupEvent],
    ) -> Result<Vec<Review>, SentimentError> {
        let mut reviews = Vec::new();
        for event in events {
            if let Some(review) = self.handle_event(state, event)? {
                reviews.push(review);
            }
        }
        Ok(reviews)
    }

    /// Advances `state` by one event, returning a review if one completed.
    ///
    /// The pending review stays in place after it is emitted, so further text
    /// inside the same review marker re-emits it with that text.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::MalformedOrdering`] if review text arrives before
    ///   any author has been captured on the stream.
    /// - [`SentimentError::EmptyText`] if the review text has no tokens.
    pub fn handle_event(
        &self,
        state: &mut ExtractorState,
        event: &MarkupEvent,
    ) -> Result<Option<Review>, SentimentError> {
        match event {
            MarkupEvent::StartTag { name, attributes } => {
                if self.markers.author.matches(name, attributes) {
                    state.in_author_span = true;
                }
                if self.markers.review.matches(name, attributes) {
                    state.in_review_paragraph = true;
                }
                Ok(None)
            }
            MarkupEvent::EndTag { name } => {
                if state.in_author_span && *name == self.markers.author.tag {
                    state.in_author_span = false;
                }
                if state.in_review_paragraph && *name == self.markers.review.tag {
                    state.in_review_paragraph = false;
                }
                Ok(None)
            }
            MarkupEvent::Text(text) => self.handle_text(state, text),
        }
    }

    fn handle_text(
        &self,
        state: &mut ExtractorState,
        text: &str,
    ) -> Result<Option<Review>, SentimentError> {
        let prefix = self.markers.author_prefix.as_str();

        if state.in_author_span {
            if text.starts_with(prefix) {
                let author = text.trim_start_matches(|c: char| prefix.contains(c));
                state.pending = Some(Review::pending(author));
            } else {
                tracing::trace!(text, "author marker text without list prefix; ignored");
            }
        }

        if !state.in_review_paragraph {
            return Ok(None);
        }

        let review = state
            .pending
            .as_mut()
            .ok_or(SentimentError::MalformedOrdering)?;
        text.clone_into(&mut review.raw_text);
        review.positive_index = score(text, self.lexicon)?;
        Ok(Some(review.clone()))
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
