//! Multi-page extraction and ranking orchestration.

use std::pin::pin;

use futures::StreamExt;
use praisecheck_core::{AppConfig, Lexicon, Review};
use praisecheck_scraper::{page_url, PageFetcher};

use crate::error::SentimentError;
use crate::extractor::{ExtractorState, ReviewExtractor, ReviewMarkers};
use crate::lexicon::load_lexicon;

/// Drives review extraction across a run of pages and ranks the result.
pub struct ReviewPipeline<'a, F> {
    fetcher: &'a F,
    extractor: ReviewExtractor<'a>,
    max_concurrent_fetches: usize,
}

impl<'a, F: PageFetcher> ReviewPipeline<'a, F> {
    #[must_use]
    pub fn new(fetcher: &'a F, lexicon: &'a Lexicon, markers: ReviewMarkers) -> Self {
        Self {
            fetcher,
            extractor: ReviewExtractor::new(markers, lexicon),
            max_concurrent_fetches: 1,
        }
    }

    /// Allows up to `limit` page requests in flight at once. Values below 1 are treated as 1.
    ///
    /// Pages are still handed to the extractor strictly in page-index order.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Fetches pages `0..page_count` of `page_url_template`, extracts and scores
    /// every review, and returns the `rank_size` most positive.
    ///
    /// All pages share one [`ExtractorState`], so a review that starts on one
    /// page may finish on the next.
    ///
    /// # Errors
    ///
    /// Any page fetch failure or extraction fault aborts the run; no partial
    /// ranking is returned.
    pub async fn run(
        &self,
        page_url_template: &str,
        page_count: u32,
        rank_size: usize,
    ) -> Result<Vec<Review>, SentimentError> {
        let fetcher = self.fetcher;
        let mut pages = pin!(futures::stream::iter(0..page_count)
            .map(move |index| {
                let url = page_url(page_url_template, index);
                async move {
                    let body = fetcher.fetch(&url).await;
                    (index, body)
                }
            })
            .buffered(self.max_concurrent_fetches));

        let mut state = ExtractorState::new();
        let mut reviews = Vec::new();

        while let Some((index, body)) = pages.next().await {
            let body = body?;
            let page_reviews = self.extractor.feed_page(&mut state, &body)?;
            tracing::debug!(page = index, reviews = page_reviews.len(), "extracted reviews");
            reviews.extend(page_reviews);
        }
        reviews.extend(self.extractor.finish(&mut state)?);

        tracing::info!(
            pages = page_count,
            extracted = reviews.len(),
            rank_size,
            "ranking reviews"
        );
        Ok(rank(reviews, rank_size))
    }
}

/// Sorts `reviews` by descending positivity index and keeps the first `rank_size`.
///
/// The sort is stable: equally scored reviews keep their extraction order.
#[must_use]
pub fn rank(mut reviews: Vec<Review>, rank_size: usize) -> Vec<Review> {
    debug_assert!(
        reviews.iter().all(Review::is_scored),
        "only scored reviews are ranked"
    );
    reviews.sort_by(|a, b| b.positive_index.total_cmp(&a.positive_index));
    reviews.truncate(rank_size);
    reviews
}

/// Runs a full ranking from configuration: load the lexicon, then scan pages.
///
/// # Errors
///
/// Returns [`SentimentError`] if the lexicon or any page cannot be fetched,
/// or if extraction faults.
pub async fn run_review_ranking<F: PageFetcher>(
    fetcher: &F,
    config: &AppConfig,
) -> Result<Vec<Review>, SentimentError> {
    let lexicon = load_lexicon(fetcher, &config.lexicon_url).await?;
    ReviewPipeline::new(fetcher, &lexicon, ReviewMarkers::from_config(config))
        .with_max_concurrent_fetches(config.max_concurrent_fetches)
        .run(
            &config.page_url_template,
            config.page_count,
            config.rank_size,
        )
        .await
}
