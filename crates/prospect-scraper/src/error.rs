use thiserror::Error;

/// Why a single page fetch failed. Every variant is recoverable: the page
/// contributes no emails and the crawl moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("domain not found for {url}")]
    Dns { url: String },

    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid website URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
