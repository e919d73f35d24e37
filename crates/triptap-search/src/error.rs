use thiserror::Error;

/// Errors from the city geocoder.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder rate limit exceeded")]
    RateLimited,

    #[error("unexpected HTTP status {status} from geocoder")]
    UnexpectedStatus { status: u16 },

    #[error("geocoder response parse error: {message}")]
    Parse { message: String },
}

/// Errors that abort a whole search run.
///
/// Everything that goes wrong for a single itinerary entry is logged and
/// reduces the results instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The trip's city could not be located, so there is no search center.
    #[error("unable to get coordinates for city: {city}")]
    CityNotFound { city: String },

    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}
