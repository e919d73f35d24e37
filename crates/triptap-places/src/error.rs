use thiserror::Error;

/// Errors returned by the places clients.
///
/// Any of these is an upstream failure from the caller's point of view: the
/// request produced no usable result.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// A legacy Maps endpoint returned a `"status"` other than `"OK"`.
    #[error("{endpoint} returned status {status}: {message}")]
    ApiStatus {
        endpoint: &'static str,
        status: String,
        message: String,
    },

    /// The requested place id does not exist.
    #[error("place not found: {place_id}")]
    NotFound { place_id: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
