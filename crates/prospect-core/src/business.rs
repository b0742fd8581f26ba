use serde::{Deserialize, Serialize};

/// A WGS84 point as returned by the geocoding and places APIs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Operational state reported by the places API.
///
/// Values the API may add later deserialize as [`BusinessStatus::Unknown`]
/// rather than failing the whole snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A business found by the place search, enriched with its detail lookup.
///
/// Built once per run by merging a search summary with a details response;
/// never mutated afterwards. Field names match the JSON snapshots written to
/// the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Places API identifier, unique within one aggregation run.
    pub place_id: String,
    pub name: String,
    /// Short "vicinity" address from the search summary.
    pub address: String,
    /// Full postal address from the detail lookup, when it succeeded.
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub location: Coordinate,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: u32,
    #[serde(default)]
    pub business_status: BusinessStatus,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Raw `opening_hours` object, passed through untouched.
    #[serde(default)]
    pub opening_hours: Option<serde_json::Value>,
}

impl Business {
    /// A business counts as active when it is operational and has at least
    /// some review signal (a rating or a non-zero rating count).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.business_status == BusinessStatus::Operational
            && (self.rating.is_some() || self.user_ratings_total > 0)
    }

    /// Address used in outreach messages: the formatted address when the
    /// detail lookup provided one, the search vicinity otherwise.
    #[must_use]
    pub fn display_address(&self) -> &str {
        self.formatted_address.as_deref().unwrap_or(&self.address)
    }
}
