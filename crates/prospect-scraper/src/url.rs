//! Website URL normalisation and contact-page candidate generation.

use reqwest::Url;

use crate::error::ScrapeError;

/// Site-relative paths tried for each website, in order. The empty path is
/// the home page.
pub const CONTACT_PATHS: &[&str] = &[
    "",
    "/contact",
    "/contact-us",
    "/contactus",
    "/iletisim",
    "/contact.html",
    "/contact.php",
    "/about",
    "/about-us",
    "/hakkimizda",
    "/about.html",
    "/footer",
    "/company",
    "/info",
];

/// Trims whitespace and prepends `https://` when the URL carries no
/// `http://` or `https://` prefix. Idempotent.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Joins each path onto the origin (scheme, host, port) of the normalised
/// website URL. Any path already present on `url` is discarded.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if the normalised URL does not parse
/// or has no host.
pub fn candidate_urls<S: AsRef<str>>(url: &str, paths: &[S]) -> Result<Vec<String>, ScrapeError> {
    let normalized = normalize_url(url);
    let parsed = Url::parse(&normalized).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ScrapeError::InvalidUrl {
            url: url.to_owned(),
            reason: "missing host".to_owned(),
        });
    }

    let origin = parsed.origin().ascii_serialization();
    Ok(paths
        .iter()
        .map(|path| format!("{origin}{}", path.as_ref()))
        .collect())
}
