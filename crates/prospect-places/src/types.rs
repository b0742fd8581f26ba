//! Response types for the Geocoding and Places web service JSON endpoints.
//!
//! Every endpoint wraps its payload in an envelope carrying a `status`
//! string (`"OK"`, `"ZERO_RESULTS"`, `"INVALID_REQUEST"`, ...). Status checks
//! happen in the client before these types are deserialized, so the envelope
//! types here only model the payload fields.

use prospect_core::{Business, BusinessStatus, Coordinate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Coordinate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// One page of nearby-search results.
#[derive(Debug, Clone, Default)]
pub struct NearbyPage {
    pub results: Vec<PlaceSummary>,
    /// Continuation token for the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// A search-result entry as returned by nearby search.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    /// Short address, e.g. `"Merter, Güngören"`. Absent for some results.
    #[serde(default)]
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub business_status: BusinessStatus,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Contact fields from a place-details lookup. Each field is absent when the
/// API has no value for it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<serde_json::Value>,
}

impl PlaceDetails {
    /// Local phone format when available, international otherwise.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.formatted_phone_number
            .as_deref()
            .or(self.international_phone_number.as_deref())
    }
}

impl PlaceSummary {
    /// Merges this summary with an optional details lookup into a
    /// [`Business`]. Without details the contact fields stay empty.
    #[must_use]
    pub fn into_business(self, details: Option<PlaceDetails>) -> Business {
        let details = details.unwrap_or_default();
        let phone = details.phone().map(str::to_owned);
        Business {
            place_id: self.place_id,
            name: self.name,
            address: self.vicinity.unwrap_or_default(),
            formatted_address: details.formatted_address,
            location: self.geometry.location,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total.unwrap_or(0),
            business_status: self.business_status,
            types: self.types,
            phone,
            website: details.website,
            opening_hours: details.opening_hours,
        }
    }
}
