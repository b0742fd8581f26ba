//! Multi-keyword place search merged into a single deduplicated business
//! list.

use std::collections::HashSet;

use prospect_core::{Business, Coordinate};

use crate::error::PlacesError;
use crate::pagination::search_keyword;
use crate::search::PlacesSearch;
use crate::types::PlaceSummary;

/// Drives a [`PlacesSearch`] through geocoding, per-keyword search, and
/// detail enrichment.
pub struct PlaceSearchAggregator<P> {
    places: P,
}

impl<P: PlacesSearch> PlaceSearchAggregator<P> {
    pub fn new(places: P) -> Self {
        Self { places }
    }

    /// Geocodes the search origin.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NotFound`] when the address has no match, or
    /// any transport/API error from the underlying client. Either is fatal
    /// for a run.
    pub async fn resolve_origin(&self, address: &str) -> Result<Coordinate, PlacesError> {
        self.places.geocode(address).await
    }

    /// See [`search_keyword`].
    pub async fn search_keyword(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
    ) -> Vec<PlaceSummary> {
        search_keyword(&self.places, origin, radius_m, keyword).await
    }

    /// Searches every keyword, merges the results by place id, and enriches
    /// each unique place with one details lookup.
    ///
    /// Failed detail lookups are logged and leave the place with its
    /// search-summary fields only.
    pub async fn aggregate<S: AsRef<str>>(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keywords: &[S],
    ) -> Vec<Business> {
        let mut batches = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            batches.push(self.search_keyword(origin, radius_m, keyword.as_ref()).await);
        }

        let unique = merge_unique(batches);
        tracing::info!(unique = unique.len(), "fetching place details");

        let mut businesses = Vec::with_capacity(unique.len());
        for summary in unique {
            let details = match self.places.place_details(&summary.place_id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!(
                        place_id = %summary.place_id,
                        name = %summary.name,
                        error = %e,
                        "place details lookup failed"
                    );
                    None
                }
            };
            businesses.push(summary.into_business(details));
        }
        businesses
    }
}

/// Flattens keyword batches, keeping the first occurrence of each place id
/// in order of first appearance.
#[must_use]
pub fn merge_unique(batches: Vec<Vec<PlaceSummary>>) -> Vec<PlaceSummary> {
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|summary| seen.insert(summary.place_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use prospect_core::BusinessStatus;

    use super::*;
    use crate::types::{Geometry, NearbyPage, PlaceDetails};

    fn summary(id: &str, name: &str) -> PlaceSummary {
        PlaceSummary {
            place_id: id.to_owned(),
            name: name.to_owned(),
            vicinity: Some(format!("{name} street")),
            geometry: Geometry {
                location: Coordinate {
                    lat: 41.0,
                    lng: 29.0,
                },
            },
            rating: Some(4.0),
            user_ratings_total: Some(10),
            business_status: BusinessStatus::Operational,
            types: vec!["store".to_owned()],
        }
    }

    /// Keyword-indexed single-page results; details keyed by place id.
    #[derive(Default)]
    struct FakePlaces {
        by_keyword: HashMap<String, Vec<PlaceSummary>>,
        details: HashMap<String, PlaceDetails>,
        detail_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PlacesSearch for FakePlaces {
        async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
            if address == "Nowhere" {
                return Err(PlacesError::NotFound {
                    address: address.to_owned(),
                });
            }
            Ok(Coordinate {
                lat: 41.0,
                lng: 29.0,
            })
        }

        async fn nearby_search(
            &self,
            _origin: Coordinate,
            _radius_m: f64,
            keyword: &str,
            _page_token: Option<&str>,
        ) -> Result<NearbyPage, PlacesError> {
            Ok(NearbyPage {
                results: self.by_keyword.get(keyword).cloned().unwrap_or_default(),
                next_page_token: None,
            })
        }

        async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
            self.detail_calls.lock().unwrap().push(place_id.to_owned());
            self.details
                .get(place_id)
                .cloned()
                .ok_or_else(|| PlacesError::Api {
                    status: "NOT_FOUND".to_owned(),
                    message: "no such place".to_owned(),
                })
        }
    }

    fn origin() -> Coordinate {
        Coordinate {
            lat: 41.0,
            lng: 29.0,
        }
    }

    #[test]
    fn merge_unique_keeps_first_occurrence_order() {
        let merged = merge_unique(vec![
            vec![summary("a", "First A"), summary("b", "B")],
            vec![summary("c", "C"), summary("a", "Second A")],
        ]);
        let ids: Vec<_> = merged.iter().map(|s| s.place_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(merged[0].name, "First A");
    }

    #[tokio::test]
    async fn resolve_origin_propagates_not_found() {
        let agg = PlaceSearchAggregator::new(FakePlaces::default());
        let result = agg.resolve_origin("Nowhere").await;
        assert!(matches!(result, Err(PlacesError::NotFound { .. })));
    }

    #[tokio::test]
    async fn same_place_from_two_keywords_yields_one_business() {
        let mut fake = FakePlaces::default();
        fake.by_keyword
            .insert("fabric".to_owned(), vec![summary("p1", "Ada Tekstil")]);
        fake.by_keyword.insert(
            "kumaş".to_owned(),
            vec![summary("p1", "Ada Tekstil (dup)"), summary("p2", "Bora Kumaş")],
        );
        fake.details.insert(
            "p1".to_owned(),
            PlaceDetails {
                website: Some("https://ada.example.com.tr".to_owned()),
                ..PlaceDetails::default()
            },
        );
        fake.details.insert("p2".to_owned(), PlaceDetails::default());

        let agg = PlaceSearchAggregator::new(fake);
        let businesses = agg.aggregate(origin(), 1000.0, &["fabric", "kumaş"]).await;

        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0].place_id, "p1");
        assert_eq!(businesses[0].name, "Ada Tekstil");
        assert_eq!(
            businesses[0].website.as_deref(),
            Some("https://ada.example.com.tr")
        );
        assert_eq!(businesses[1].place_id, "p2");
        assert_eq!(*agg.places.detail_calls.lock().unwrap(), ["p1", "p2"]);
    }

    #[tokio::test]
    async fn failed_details_keep_summary_fields() {
        let mut fake = FakePlaces::default();
        fake.by_keyword
            .insert("fabric".to_owned(), vec![summary("p9", "Orphan Ltd")]);

        let agg = PlaceSearchAggregator::new(fake);
        let businesses = agg.aggregate(origin(), 1000.0, &["fabric"]).await;

        assert_eq!(businesses.len(), 1);
        let b = &businesses[0];
        assert_eq!(b.name, "Orphan Ltd");
        assert_eq!(b.address, "Orphan Ltd street");
        assert_eq!(b.user_ratings_total, 10);
        assert!(b.website.is_none());
        assert!(b.phone.is_none());
    }

    #[tokio::test]
    async fn no_keywords_yields_empty_list() {
        let agg = PlaceSearchAggregator::new(FakePlaces::default());
        let keywords: [&str; 0] = [];
        assert!(agg.aggregate(origin(), 1000.0, &keywords).await.is_empty());
    }
}
