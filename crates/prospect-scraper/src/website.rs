//! Multi-page contact email discovery for one business website.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::extract::page_emails;
use crate::fetch::PageFetcher;
use crate::filter::is_valid_email;
use crate::url::{candidate_urls, CONTACT_PATHS};

/// Local-part prefixes that mark a general contact inbox, most preferred
/// first.
pub const PRIORITY_PREFIXES: &[&str] = &[
    "info", "contact", "iletisim", "sales", "satis", "support", "destek", "hello", "inquiry",
    "business", "office", "admin",
];

/// Pauses between page fetches within one website crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPacing {
    /// After a page that yielded at least one candidate.
    pub after_hit: Duration,
    /// After a page that yielded nothing (or failed).
    pub after_miss: Duration,
    /// Once all pages of a site have been tried.
    pub after_site: Duration,
}

impl Default for CrawlPacing {
    fn default() -> Self {
        Self {
            after_hit: Duration::from_millis(300),
            after_miss: Duration::from_millis(100),
            after_site: Duration::from_millis(500),
        }
    }
}

impl CrawlPacing {
    #[must_use]
    pub fn none() -> Self {
        Self {
            after_hit: Duration::ZERO,
            after_miss: Duration::ZERO,
            after_site: Duration::ZERO,
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Resolves a business website to its best contact address.
#[async_trait]
pub trait EmailFinder: Send + Sync {
    /// Returns `None` when no usable address was found. Never fails.
    async fn find_email(&self, website: &str) -> Option<String>;
}

/// Crawls the home page and common contact/about pages of a website and
/// gathers validated email addresses.
pub struct WebsiteEmailScraper<F> {
    fetcher: F,
    paths: Vec<String>,
    pacing: CrawlPacing,
}

impl<F: PageFetcher> WebsiteEmailScraper<F> {
    /// Scraper over [`CONTACT_PATHS`] with default pacing.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            paths: CONTACT_PATHS.iter().map(|p| (*p).to_owned()).collect(),
            pacing: CrawlPacing::default(),
        }
    }

    #[must_use]
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the crawl to the home page.
    #[must_use]
    pub fn single_page(self) -> Self {
        self.with_paths([""])
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: CrawlPacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Raw candidates from one page. Fetch failures are logged by cause and
    /// yield an empty list.
    pub async fn fetch_page_emails(&self, page_url: &str) -> Vec<String> {
        match self.fetcher.fetch(page_url).await {
            Ok(html) => page_emails(&html),
            Err(err) => {
                log_fetch_failure(page_url, &err);
                Vec::new()
            }
        }
    }

    /// Every validated address found across the candidate pages of
    /// `website`, in order of first appearance.
    pub async fn extract_emails(&self, website: &str) -> Vec<String> {
        if website.trim().is_empty() {
            return Vec::new();
        }
        let pages = match candidate_urls(website, &self.paths) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(website, error = %e, "skipping website");
                return Vec::new();
            }
        };

        let mut raw = Vec::new();
        for page in &pages {
            let found = self.fetch_page_emails(page).await;
            tracing::debug!(page = %page, candidates = found.len(), "scanned page");
            if found.is_empty() {
                pause(self.pacing.after_miss).await;
            } else {
                raw.extend(found);
                pause(self.pacing.after_hit).await;
            }
        }

        let mut seen = HashSet::new();
        let emails: Vec<String> = raw
            .into_iter()
            .filter(|email| seen.insert(email.clone()))
            .filter(|email| is_valid_email(email))
            .collect();

        pause(self.pacing.after_site).await;
        tracing::info!(website, pages = pages.len(), emails = emails.len(), "website crawl complete");
        emails
    }
}

#[async_trait]
impl<F: PageFetcher> EmailFinder for WebsiteEmailScraper<F> {
    async fn find_email(&self, website: &str) -> Option<String> {
        let emails = self.extract_emails(website).await;
        pick_best(&emails)
    }
}

fn log_fetch_failure(page_url: &str, err: &FetchError) {
    match err {
        FetchError::Timeout { .. } => tracing::debug!(page = page_url, "page fetch timed out"),
        FetchError::Status { status, .. } => {
            tracing::debug!(page = page_url, status, "page returned error status");
        }
        FetchError::Dns { .. } => tracing::debug!(page = page_url, "domain not found"),
        FetchError::TooLarge { limit, .. } => {
            tracing::debug!(page = page_url, limit, "page body too large");
        }
        FetchError::Http { source, .. } => {
            tracing::debug!(page = page_url, error = %source, "page fetch failed");
        }
    }
}

/// Picks the address whose local part starts with the most preferred entry
/// of [`PRIORITY_PREFIXES`], falling back to the first address.
#[must_use]
pub fn pick_best(emails: &[String]) -> Option<String> {
    let first = emails.first()?;
    for prefix in PRIORITY_PREFIXES {
        if let Some(hit) = emails.iter().find(|email| local_part(email).starts_with(*prefix)) {
            return Some(hit.clone());
        }
    }
    Some(first.clone())
}

fn local_part(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
#[path = "website_test.rs"]
mod tests;
