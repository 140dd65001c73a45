//! Integration tests for lexicon loading and the multi-page ranking pipeline.
//!
//! HTTP behavior runs against a local `wiremock` server; ordering and
//! fetch-count properties use an in-memory fetcher.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use praisecheck_core::{AppConfig, Lexicon, MarkerSignature};
use praisecheck_scraper::{FetchError, HttpFetcher, PageFetcher};
use praisecheck_sentiment::{
    is_well_formed_entry, load_lexicon, run_review_ranking, ReviewMarkers, ReviewPipeline,
    SentimentError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHOR_CLASS: &str = "italic font-18 black notranslate";
const REVIEW_CLASS: &str = "font-16 review-content margin-bottom-none line-height-25";

const LEXICON_DOC: &str = "\
;;; header line
;
; positive words

amazing
awesome
friendly
good
great
helpful
";

fn review_block(author: &str, text: &str) -> String {
    format!(
        r#"<div class="review-entry">
  <span class="{AUTHOR_CLASS}">- {author}</span>
  <p class="{REVIEW_CLASS}">{text}</p>
</div>
"#
    )
}

fn page(blocks: &[(&str, &str)]) -> String {
    let body: String = blocks.iter().map(|(a, t)| review_block(a, t)).collect();
    format!("<!DOCTYPE html><html><body>{body}</body></html>\n")
}

fn test_config(base: &str, page_count: u32, rank_size: usize) -> AppConfig {
    AppConfig {
        lexicon_url: format!("{base}/positive-words.txt"),
        page_url_template: format!("{base}/dealer/page"),
        page_count,
        rank_size,
        author_prefix: "- ".to_owned(),
        author_marker: MarkerSignature::class("span", AUTHOR_CLASS),
        review_marker: MarkerSignature::class("p", REVIEW_CLASS),
        request_timeout_secs: 5,
        user_agent: "praisecheck-test/0.1".to_owned(),
        max_concurrent_fetches: 1,
        log_level: "debug".to_owned(),
    }
}

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(5, "praisecheck-test/0.1").expect("failed to build test HttpFetcher")
}

async fn mount_text(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves pages from memory, records every requested URL, and delays each
/// response by a per-URL amount.
#[derive(Default)]
struct MemoryFetcher {
    pages: HashMap<String, (String, Duration)>,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    fn with_page(mut self, url: &str, body: String, delay_ms: u64) -> Self {
        self.pages
            .insert(url.to_owned(), (body, Duration::from_millis(delay_ms)));
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_owned());
        let Some((body, delay)) = self.pages.get(url) else {
            return Err(FetchError::UnexpectedStatus {
                status: 404,
                url: url.to_owned(),
            });
        };
        tokio::time::sleep(*delay).await;
        Ok(body.clone())
    }
}

fn lexicon() -> Lexicon {
    ["good", "great", "awesome", "friendly"].into_iter().collect()
}

// ---------------------------------------------------------------------------
// Lexicon loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_lexicon_fetches_and_parses_document() {
    let server = MockServer::start().await;
    mount_text(&server, "/positive-words.txt", LEXICON_DOC.to_owned()).await;

    let url = format!("{}/positive-words.txt", server.uri());
    let lexicon = load_lexicon(&test_fetcher(), &url).await.expect("lexicon should load");

    assert_eq!(lexicon.len(), 6);
    assert!(lexicon.contains("helpful"));
    assert!(lexicon.iter().all(is_well_formed_entry));
}

#[tokio::test]
async fn load_lexicon_missing_resource_is_fetch_error() {
    let server = MockServer::start().await;

    let url = format!("{}/positive-words.txt", server.uri());
    let result = load_lexicon(&test_fetcher(), &url).await;
    assert!(
        matches!(
            result,
            Err(SentimentError::Fetch(FetchError::UnexpectedStatus { status: 404, .. }))
        ),
        "expected Fetch(UnexpectedStatus 404), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Full runs over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_review_ranking_ranks_reviews_across_pages() {
    let server = MockServer::start().await;
    mount_text(&server, "/positive-words.txt", LEXICON_DOC.to_owned()).await;
    mount_text(
        &server,
        "/dealer/page0",
        page(&[
            ("Ana", "The staff was friendly"),
            ("Ben", "Great great great service"),
        ]),
    )
    .await;
    mount_text(
        &server,
        "/dealer/page1",
        page(&[
            ("Cy", "Waited two hours for nothing"),
            ("Di", "Amazing and helpful team"),
        ]),
    )
    .await;

    let config = test_config(&server.uri(), 2, 3);
    let ranked = run_review_ranking(&test_fetcher(), &config)
        .await
        .expect("run should succeed");

    let authors: Vec<&str> = ranked.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["Ben", "Di", "Ana"]);
    assert!((ranked[0].positive_index - 0.75).abs() < f64::EPSILON);
    assert!((ranked[1].positive_index - 0.5).abs() < f64::EPSILON);
    assert!((ranked[2].positive_index - 0.25).abs() < f64::EPSILON);
    assert_eq!(ranked[0].raw_text, "Great great great service");
}

#[tokio::test]
async fn run_review_ranking_page_failure_aborts_run() {
    let server = MockServer::start().await;
    mount_text(&server, "/positive-words.txt", LEXICON_DOC.to_owned()).await;
    mount_text(&server, "/dealer/page0", page(&[("Ana", "good")])).await;
    Mock::given(method("GET"))
        .and(path("/dealer/page1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2, 3);
    let result = run_review_ranking(&test_fetcher(), &config).await;

    match result {
        Err(SentimentError::Fetch(err)) => {
            assert_eq!(err.url(), Some(format!("{}/dealer/page1", server.uri()).as_str()));
        }
        other => panic!("expected Fetch error for page1, got: {other:?}"),
    }
}

#[tokio::test]
async fn run_review_ranking_lexicon_failure_fetches_no_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/positive-words.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dealer/page0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 1, 3);
    let result = run_review_ranking(&test_fetcher(), &config).await;
    assert!(
        matches!(result, Err(SentimentError::Fetch(_))),
        "expected Fetch error, got: {result:?}"
    );
}

#[tokio::test]
async fn run_review_ranking_surfaces_malformed_ordering() {
    let server = MockServer::start().await;
    mount_text(&server, "/positive-words.txt", LEXICON_DOC.to_owned()).await;
    mount_text(
        &server,
        "/dealer/page0",
        format!(r#"<p class="{REVIEW_CLASS}">orphan review text</p>"#),
    )
    .await;

    let config = test_config(&server.uri(), 1, 3);
    let result = run_review_ranking(&test_fetcher(), &config).await;
    assert!(
        matches!(result, Err(SentimentError::MalformedOrdering)),
        "expected MalformedOrdering, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Pipeline properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_pages_returns_empty_without_fetching() {
    let fetcher = MemoryFetcher::default();
    let lexicon = lexicon();
    let pipeline = ReviewPipeline::new(&fetcher, &lexicon, ReviewMarkers::default());

    let ranked = pipeline.run("https://reviews.test/page", 0, 3).await.unwrap();

    assert!(ranked.is_empty());
    assert!(fetcher.requested().is_empty());
}

#[tokio::test]
async fn rank_size_beyond_review_count_returns_all_sorted() {
    let fetcher = MemoryFetcher::default().with_page(
        "https://reviews.test/page0",
        page(&[("Low", "it was fine"), ("High", "good great")]),
        0,
    );
    let lexicon = lexicon();
    let pipeline = ReviewPipeline::new(&fetcher, &lexicon, ReviewMarkers::default());

    let ranked = pipeline.run("https://reviews.test/page", 1, 10).await.unwrap();

    let authors: Vec<&str> = ranked.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["High", "Low"]);
}

#[tokio::test]
async fn pages_are_requested_in_index_order() {
    let fetcher = MemoryFetcher::default()
        .with_page("https://reviews.test/page0", page(&[("A", "good")]), 0)
        .with_page("https://reviews.test/page1", page(&[("B", "good")]), 0)
        .with_page("https://reviews.test/page2", page(&[("C", "good")]), 0);
    let lexicon = lexicon();
    let pipeline = ReviewPipeline::new(&fetcher, &lexicon, ReviewMarkers::default());

    let ranked = pipeline.run("https://reviews.test/page", 3, 3).await.unwrap();

    assert_eq!(
        fetcher.requested(),
        vec![
            "https://reviews.test/page0",
            "https://reviews.test/page1",
            "https://reviews.test/page2",
        ]
    );
    let authors: Vec<&str> = ranked.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["A", "B", "C"], "ties keep extraction order");
}

#[tokio::test]
async fn concurrent_fetches_still_feed_pages_in_order() {
    let author_open = format!(r#"<span class="{AUTHOR_CLASS}">"#);
    let review_open = format!(r#"<p class="{REVIEW_CLASS}">"#);

    // The review on page1 belongs to the author captured at the end of page0.
    // Page0 is slowest, so it completes last; feeding must still start with it.
    let fetcher = MemoryFetcher::default()
        .with_page(
            "https://reviews.test/page0",
            format!("{author_open}- Split</span>"),
            150,
        )
        .with_page(
            "https://reviews.test/page1",
            format!("{review_open}good friendly</p>"),
            0,
        )
        .with_page(
            "https://reviews.test/page2",
            page(&[("Whole", "great day overall")]),
            50,
        );
    let lexicon = lexicon();
    let pipeline = ReviewPipeline::new(&fetcher, &lexicon, ReviewMarkers::default())
        .with_max_concurrent_fetches(3);

    let ranked = pipeline.run("https://reviews.test/page", 3, 5).await.unwrap();

    let authors: Vec<&str> = ranked.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, vec!["Split", "Whole"]);
    assert!((ranked[0].positive_index - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn review_split_across_page_boundary_is_emitted_per_page() {
    let fetcher = MemoryFetcher::default()
        .with_page(
            "https://reviews.test/page0",
            format!(r#"<span class="{AUTHOR_CLASS}">- Edge</span><p class="{REVIEW_CLASS}">awesome "#),
            0,
        )
        .with_page(
            "https://reviews.test/page1",
            "people</p>".to_owned(),
            0,
        );
    let lexicon = lexicon();
    let pipeline = ReviewPipeline::new(&fetcher, &lexicon, ReviewMarkers::default());

    let ranked = pipeline.run("https://reviews.test/page", 2, 3).await.unwrap();

    let texts: Vec<&str> = ranked.iter().map(|r| r.raw_text.as_str()).collect();
    assert_eq!(texts, vec!["awesome ", "people"]);
    assert!(ranked.iter().all(|r| r.author == "Edge"));
    assert!((ranked[0].positive_index - 1.0).abs() < f64::EPSILON);
    assert!(ranked[1].positive_index.abs() < f64::EPSILON);
}
