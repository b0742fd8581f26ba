pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod url;
pub mod website;

pub use error::{FetchError, ScrapeError};
pub use extract::page_emails;
pub use fetch::{HttpPageFetcher, PageFetcher, MAX_BODY_BYTES};
pub use filter::is_valid_email;
pub use url::{candidate_urls, normalize_url, CONTACT_PATHS};
pub use website::{pick_best, CrawlPacing, EmailFinder, WebsiteEmailScraper, PRIORITY_PREFIXES};
