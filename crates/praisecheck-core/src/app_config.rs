use crate::review::MarkerSignature;

pub const DEFAULT_LEXICON_URL: &str = "https://gist.githubusercontent.com/mkulakowski2/4289437/raw/1bb4d7f9ee82150f339f09b5b1a0e6823d633958/positive-words.txt";

pub const DEFAULT_PAGE_URL_TEMPLATE: &str = "https://www.dealerrater.com/dealer/McKaig-Chevrolet-Buick-A-Dealer-For-The-People-dealer-reviews-23685/page";

pub const DEFAULT_AUTHOR_PREFIX: &str = "- ";

pub const DEFAULT_AUTHOR_CLASS: &str = "italic font-18 black notranslate";

pub const DEFAULT_REVIEW_CLASS: &str = "font-16 review-content margin-bottom-none line-height-25";

/// Runtime configuration for a ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub lexicon_url: String,
    /// Page index is appended verbatim to this prefix.
    pub page_url_template: String,
    pub page_count: u32,
    pub rank_size: usize,
    pub author_prefix: String,
    pub author_marker: MarkerSignature,
    pub review_marker: MarkerSignature,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_fetches: usize,
    pub log_level: String,
}
