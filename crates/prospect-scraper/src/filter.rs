//! Precision pass over loosely extracted email candidates.

use std::sync::LazyLock;

use regex::Regex;

static STRICT_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

/// Asset extensions that the loose pattern picks up from filenames such as
/// `logo@2x.png`.
const ASSET_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".css", ".js"];

/// Placeholder and platform domains that never belong to a real contact.
const DENIED_DOMAINS: &[&str] = &[
    "example.com",
    "domain.com",
    "email.com",
    "test.com",
    "sample.com",
    "sentry.io",
    "googleusercontent.com",
    "w3.org",
    "schema.org",
];

/// Returns `true` when `candidate` is a plausible contact address.
///
/// Rejects strings that do not fully match the strict address pattern, that
/// end in an asset extension, or whose domain ends with a denied domain.
/// All comparisons are case-insensitive.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    if !STRICT_EMAIL_RE.is_match(candidate) {
        return false;
    }

    let lower = candidate.to_ascii_lowercase();
    if ASSET_SUFFIXES.iter().any(|ext| lower.ends_with(ext)) {
        return false;
    }

    let Some((_, domain)) = lower.rsplit_once('@') else {
        return false;
    };
    !DENIED_DOMAINS.iter().any(|denied| domain.ends_with(denied))
}
