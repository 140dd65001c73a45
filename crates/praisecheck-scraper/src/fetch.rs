//! HTTP page retrieval.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// Anything that can turn a URL into page text.
///
/// One attempt per call; retry policy, if any, belongs to the implementor.
pub trait PageFetcher {
    /// Fetches `url` and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout, or a non-2xx status.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `reqwest`-backed [`PageFetcher`] with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher` with the given total request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let http_err = |source| FetchError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Builds the URL of review page `index` by appending the index to `template`.
#[must_use]
pub fn page_url(template: &str, index: u32) -> String {
    format!("{template}{index}")
}
