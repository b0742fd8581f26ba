use thiserror::Error;

/// Errors returned by the places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a non-OK `status` field, e.g. `REQUEST_DENIED`
    /// or `INVALID_REQUEST`.
    #[error("places API returned {status}: {message}")]
    Api { status: String, message: String },

    /// Geocoding produced no result for the address.
    #[error("could not geocode location: {address}")]
    NotFound { address: String },

    #[error("invalid places base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
