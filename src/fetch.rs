//! Page fetching
//!
//! One blocking GET per call, no retries. Timeouts are the client defaults.

use thiserror::Error;
use tracing::debug;

/// Fetch error types
///
/// Every variant ends up as the same "not available" outcome for the site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body read error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP non-success status
    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },

    /// A required element is not on the page
    #[error("no element matching `{0}`")]
    MissingElement(&'static str),

    /// CSS selector did not parse
    #[error("invalid selector `{0}`")]
    InvalidSelector(&'static str),

    /// URL could not be built or resolved
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// A fetch failure together with the URL that was being attempted
#[derive(Debug, Error)]
#[error("{url}: {source}")]
pub struct ScrapeFailure {
    pub url: String,
    #[source]
    pub source: FetchError,
}

impl ScrapeFailure {
    pub fn at(url: &str, source: FetchError) -> Self {
        ScrapeFailure {
            url: url.to_string(),
            source,
        }
    }
}

/// PageFetcher - Turns a URL into an HTML body
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }
}
