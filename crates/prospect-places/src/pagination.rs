use prospect_core::Coordinate;

use crate::search::PlacesSearch;
use crate::types::PlaceSummary;

/// Upper bound on nearby-search pages fetched per keyword. The API itself
/// stops issuing continuation tokens after three pages.
pub const MAX_PAGES: usize = 3;

/// Collects up to [`MAX_PAGES`] pages of nearby-search results for one
/// keyword, following continuation tokens.
///
/// A failing page ends the search for this keyword; results gathered from
/// earlier pages are still returned. The error is logged, not propagated.
pub async fn search_keyword<P>(
    places: &P,
    origin: Coordinate,
    radius_m: f64,
    keyword: &str,
) -> Vec<PlaceSummary>
where
    P: PlacesSearch + ?Sized,
{
    let mut collected = Vec::new();
    let mut page_token: Option<String> = None;

    for page in 1..=MAX_PAGES {
        match places
            .nearby_search(origin, radius_m, keyword, page_token.as_deref())
            .await
        {
            Ok(result) => {
                tracing::debug!(keyword, page, results = result.results.len(), "collected page");
                collected.extend(result.results);
                match result.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            Err(e) => {
                tracing::warn!(keyword, page, error = %e, "nearby search failed; keeping partial results");
                break;
            }
        }
    }

    tracing::info!(keyword, found = collected.len(), "keyword search complete");
    collected
}
