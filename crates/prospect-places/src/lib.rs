pub mod aggregate;
pub mod client;
pub mod error;
pub mod pagination;
pub mod search;
pub mod types;

pub use aggregate::{merge_unique, PlaceSearchAggregator};
pub use client::{PlacesClient, DETAIL_FIELDS};
pub use error::PlacesError;
pub use pagination::{search_keyword, MAX_PAGES};
pub use search::PlacesSearch;
pub use types::{NearbyPage, PlaceDetails, PlaceSummary};
