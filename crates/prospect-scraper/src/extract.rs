//! Recall-first email extraction from a single HTML page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Deliberately unanchored so addresses embedded in longer text are found;
/// [`crate::is_valid_email`] does the precision pass afterwards.
static LOOSE_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript"];

/// Collects raw email-like strings from `html`: `mailto:` link targets
/// first, then loose-pattern matches over the visible body text. Duplicates
/// and invalid candidates are left for the caller to filter.
#[must_use]
pub fn page_emails(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut found = mailto_targets(&document);

    let text = visible_text(&document);
    found.extend(
        LOOSE_EMAIL_RE
            .find_iter(&text)
            .map(|m| m.as_str().to_owned()),
    );
    found
}

/// `href` targets of `a[href^="mailto:"]` with the scheme and any query
/// (`?subject=...`) removed.
fn mailto_targets(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(r#"a[href^="mailto:"]"#) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| {
            let rest = href.strip_prefix("mailto:")?;
            let address = rest.split('?').next().unwrap_or_default().trim();
            (!address.is_empty()).then(|| address.to_owned())
        })
        .collect()
}

/// Text nodes under `<body>` joined by single spaces, skipping anything
/// inside `script`, `style`, or `noscript`. The separator keeps adjacent
/// cells like `<td>Tel</td><td>info@x.com</td>` from fusing into one match.
fn visible_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ElementRef::wrap(ancestor).is_some_and(|el| HIDDEN_TAGS.contains(&el.value().name()))
        });
        if !hidden {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(chunk);
        }
    }
    text
}
