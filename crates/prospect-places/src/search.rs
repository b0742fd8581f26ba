use async_trait::async_trait;
use prospect_core::Coordinate;

use crate::error::PlacesError;
use crate::types::{NearbyPage, PlaceDetails};

/// Source of geocoding, nearby search, and place details.
///
/// [`crate::PlacesClient`] is the production implementation. Implementations
/// own any request spacing their upstream requires; callers issue requests
/// back to back.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    /// Resolves a free-form address to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NotFound`] when the address has no match.
    async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError>;

    /// Fetches one page of places matching `keyword` within `radius_m`
    /// metres of `origin`. Pass the previous page's token to continue.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on transport or API failure.
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError>;

    /// Looks up contact fields for a single place.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] on transport or API failure.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}
