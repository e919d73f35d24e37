//! City geocoding.
//!
//! The search center is the city's coordinate as reported by a Nominatim
//! (OpenStreetMap) instance. The public instance allows one request per
//! second and requires an identifying `User-Agent`; one search run issues a
//! single lookup.

use std::future::Future;
use std::time::Duration;

use triptap_core::{AppConfig, Coordinate};

use crate::error::GeocodeError;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves a free-text city name to a coordinate.
///
/// `Ok(None)` means the lookup succeeded but matched nothing.
pub trait GeoLookup: Send + Sync {
    fn resolve(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    url: String,
}

impl NominatimGeocoder {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::new(
            &config.geocoder_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }
}

impl GeoLookup for NominatimGeocoder {
    async fn resolve(&self, city: &str) -> Result<Option<Coordinate>, GeocodeError> {
        tracing::debug!(city, url = %self.url, "geocoding city");

        let resp = self
            .client
            .get(&self.url)
            .query(&[("q", city), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

fn parse_response(body: &serde_json::Value) -> Result<Option<Coordinate>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = parse_degrees(&first["lat"]).ok_or_else(|| GeocodeError::Parse {
        message: "missing lat in Nominatim response".to_string(),
    })?;
    let lon = parse_degrees(&first["lon"]).ok_or_else(|| GeocodeError::Parse {
        message: "missing lon in Nominatim response".to_string(),
    })?;

    Ok(Some(Coordinate::new(lat, lon)))
}

// Nominatim returns degrees as strings; accept bare numbers too.
fn parse_degrees(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
