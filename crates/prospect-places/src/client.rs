//! HTTP client for the Google Geocoding and Places web service APIs.
//!
//! Every endpoint answers with a JSON envelope carrying a `"status"` field.
//! `OK` and `ZERO_RESULTS` are success; anything else is surfaced as
//! [`PlacesError::Api`] with the accompanying `error_message`.

use std::time::Duration;

use async_trait::async_trait;
use prospect_core::{Coordinate, Throttle};
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::search::PlacesSearch;
use crate::types::{
    GeocodeResponse, NearbyPage, NearbySearchResponse, PlaceDetails, PlaceDetailsResponse,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

/// Minimum spacing between consecutive place-details requests.
const DETAIL_SPACING: Duration = Duration::from_millis(200);

/// A continuation token is not valid until shortly after it is issued.
const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// Fields requested from the details endpoint. Restricting the field mask
/// keeps the request in the cheaper billing tier.
pub const DETAIL_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "international_phone_number",
    "website",
    "opening_hours",
    "business_status",
    "rating",
    "user_ratings_total",
];

/// Client for the Geocoding and Places APIs.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    detail_throttle: Throttle,
    page_token_delay: Duration,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("prospect/0.1 (business-outreach)")
            .build()?;

        // Exactly one trailing slash so endpoint paths join under the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            detail_throttle: Throttle::new(DETAIL_SPACING),
            page_token_delay: PAGE_TOKEN_DELAY,
        })
    }

    /// Overrides the details spacing and page-token delay.
    #[must_use]
    pub fn with_pacing(mut self, detail_spacing: Duration, page_token_delay: Duration) -> Self {
        self.detail_throttle = Throttle::new(detail_spacing);
        self.page_token_delay = page_token_delay;
        self
    }

    /// Builds the full request URL for `endpoint` with percent-encoded query
    /// parameters. The API key is always the first parameter.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON. Transport errors drop their URL, which carries the key.
    async fn request_json(&self, url: &Url, context: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Returns the envelope `status` when it signals success, or
    /// [`PlacesError::Api`] otherwise. A body without a status is treated as
    /// `OK`.
    fn check_status(body: &serde_json::Value) -> Result<&str, PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("OK");
        match status {
            "OK" | "ZERO_RESULTS" => Ok(status),
            other => {
                let message = body
                    .get("error_message")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown error")
                    .to_owned();
                Err(PlacesError::Api {
                    status: other.to_owned(),
                    message,
                })
            }
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, PlacesError> {
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl PlacesSearch for PlacesClient {
    async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
        let context = format!("geocode(address={address})");
        let url = self.build_url("geocode/json", &[("address", address)])?;
        let body = self.request_json(&url, &context).await?;
        Self::check_status(&body)?;

        let envelope: GeocodeResponse = Self::decode(body, &context)?;
        let location = envelope
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| PlacesError::NotFound {
                address: address.to_owned(),
            })?;

        tracing::info!(address, lat = location.lat, lng = location.lng, "geocoded search origin");
        Ok(location)
    }

    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        if page_token.is_some() && !self.page_token_delay.is_zero() {
            tracing::debug!(
                delay_ms = self.page_token_delay.as_millis(),
                "waiting for page token to become valid"
            );
            tokio::time::sleep(self.page_token_delay).await;
        }

        let location = format!("{},{}", origin.lat, origin.lng);
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("keyword", keyword),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let context = format!("nearbysearch(keyword={keyword})");
        let url = self.build_url("place/nearbysearch/json", &params)?;
        let body = self.request_json(&url, &context).await?;
        Self::check_status(&body)?;

        let envelope: NearbySearchResponse = Self::decode(body, &context)?;
        tracing::debug!(
            keyword,
            results = envelope.results.len(),
            has_next = envelope.next_page_token.is_some(),
            "nearby search page received"
        );
        Ok(NearbyPage {
            results: envelope.results,
            next_page_token: envelope.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.detail_throttle.wait().await;

        let fields = DETAIL_FIELDS.join(",");
        let context = format!("details(place_id={place_id})");
        let url = self.build_url(
            "place/details/json",
            &[("place_id", place_id), ("fields", fields.as_str())],
        )?;
        let body = self.request_json(&url, &context).await?;
        Self::check_status(&body)?;

        let envelope: PlaceDetailsResponse = Self::decode(body, &context)?;
        Ok(envelope.result.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
