use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl FetchError {
    /// The URL that failed, when the failure happened on a request.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Client(_) => None,
            Self::Http { url, .. } | Self::UnexpectedStatus { url, .. } => Some(url.as_str()),
        }
    }
}
