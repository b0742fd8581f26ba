//! Bounded HTML page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};

use crate::error::FetchError;

/// Upper bound on a fetched page body.
pub const MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;

const MAX_REDIRECTS: usize = 5;

/// Fetches one page and returns its body as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`FetchError`] classifying why the page could not be read.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] over `reqwest` with a total timeout, a browser
/// `User-Agent`, at most five redirects, and a 5 MiB body cap. Only 2xx and
/// 3xx responses are accepted.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the underlying client cannot be built.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > MAX_BODY_BYTES)
        {
            return Err(FetchError::TooLarge {
                url: url.to_owned(),
                limit: MAX_BODY_BYTES,
            });
        }

        // Content-Length may be absent or wrong; enforce the cap while streaming.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| classify(url, e))? {
            if (body.len() + chunk.len()) as u64 > MAX_BODY_BYTES {
                return Err(FetchError::TooLarge {
                    url: url.to_owned(),
                    limit: MAX_BODY_BYTES,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Maps a transport error to the matching [`FetchError`] variant.
fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout {
            url: url.to_owned(),
        };
    }
    if let Some(status) = err.status() {
        return FetchError::Status {
            status: status.as_u16(),
            url: url.to_owned(),
        };
    }
    if is_dns_failure(&err) {
        return FetchError::Dns {
            url: url.to_owned(),
        };
    }
    FetchError::Http {
        url: url.to_owned(),
        source: err,
    }
}

/// Walks the error source chain looking for a resolver failure. hyper does
/// not expose a typed DNS error, so this matches on the rendered messages.
fn is_dns_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let msg = e.to_string().to_ascii_lowercase();
        if msg.contains("dns error") || msg.contains("failed to lookup address") {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped {
        msg: &'static str,
        source: Option<Box<dyn std::error::Error + 'static>>,
    }

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.source.as_deref()
        }
    }

    #[test]
    fn dns_failure_found_deep_in_chain() {
        let inner = std::io::Error::other("failed to lookup address information: Name or service not known");
        let middle = Wrapped {
            msg: "client error (Connect)",
            source: Some(Box::new(inner)),
        };
        let outer = Wrapped {
            msg: "error sending request",
            source: Some(Box::new(middle)),
        };
        assert!(is_dns_failure(&outer));
    }

    #[test]
    fn dns_error_prefix_is_recognised() {
        let err = Wrapped {
            msg: "dns error: no record found",
            source: None,
        };
        assert!(is_dns_failure(&err));
    }

    #[test]
    fn connection_refused_is_not_dns() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let outer = Wrapped {
            msg: "error sending request",
            source: Some(Box::new(inner)),
        };
        assert!(!is_dns_failure(&outer));
    }
}
