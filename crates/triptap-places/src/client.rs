//! HTTP client for the Google Places API (new).
//!
//! Wraps `reqwest` with API-key and field-mask headers, HTTP status checks,
//! and typed response deserialization. Configuration is an immutable
//! [`PlacesConfig`] value; headers are built per request, so a single client
//! can be shared freely across concurrent tasks.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use triptap_core::{AppConfig, Coordinate};

use crate::error::PlacesError;
use crate::field_mask::FieldMask;
use crate::filters::{clamp_radius, Circle, NearbySearchFilters, TextSearchFilters};
use crate::normalize::normalize_places;
use crate::place::PlaceRecord;
use crate::types::{
    CircleArea, LatLng, LocationArea, NearbySearchRequest, SearchPlacesResponse,
    TextSearchRequest,
};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Longest error body kept in [`PlacesError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Immutable connection settings for [`PlacesClient`].
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub places_base_url: String,
    pub maps_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl PlacesConfig {
    /// Settings pointed at the production Google endpoints.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            places_base_url: DEFAULT_PLACES_BASE_URL.to_owned(),
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_owned(),
            timeout_secs: 10,
            user_agent: "triptap/0.1 (itinerary-planner)".to_owned(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.google_api_key.clone(),
            places_base_url: config.places_base_url.clone(),
            maps_base_url: config.maps_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Point both the new and legacy endpoints at one base URL (for testing
    /// with wiremock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.places_base_url = base_url.to_owned();
        self.maps_base_url = base_url.to_owned();
        self
    }
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("maps_base_url", &self.maps_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Successful search response. An empty `places` list is a valid result and
/// distinct from a [`PlacesError`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub places: Vec<PlaceRecord>,
}

impl SearchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&PlaceRecord> {
        self.places.first()
    }
}

/// Client for the Places API (new) text/nearby search and the legacy details
/// endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct PlacesClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    places_base_url: String,
    pub(crate) maps_base_url: String,
}

impl PlacesClient {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if either
    /// base URL does not parse.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            places_base_url: normalise_base_url(&config.places_base_url)?,
            maps_base_url: normalise_base_url(&config.maps_base_url)?,
        })
    }

    /// Free-text place search (`places:searchText`).
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx response.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        field_mask: &FieldMask,
        filters: &TextSearchFilters,
    ) -> Result<SearchResult, PlacesError> {
        let body = TextSearchRequest {
            text_query: query,
            min_rating: filters.min_rating,
            included_type: filters.included_type.as_deref(),
            location_bias: filters.location_bias.map(location_area),
        };

        tracing::debug!(query, "places text search");
        let url = format!("{}/places:searchText", self.places_base_url);
        self.post_search("places:searchText", &url, field_mask, &body)
            .await
    }

    /// Radius-bounded search around `center` (`places:searchNearby`).
    ///
    /// `radius_meters` is clamped to [`crate::MAX_RADIUS_METERS`] before the
    /// request is built.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx response.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn nearby_search(
        &self,
        center: Coordinate,
        radius_meters: f64,
        field_mask: &FieldMask,
        filters: &NearbySearchFilters,
    ) -> Result<SearchResult, PlacesError> {
        let area = location_area(Circle::new(center, radius_meters));
        tracing::debug!(
            center = %center,
            radius_meters = area.circle.radius,
            included_types = ?filters.included_types,
            "places nearby search"
        );

        let body = NearbySearchRequest {
            location_restriction: area,
            min_rating: filters.min_rating,
            included_types: &filters.included_types,
            max_result_count: filters.max_result_count,
        };

        let url = format!("{}/places:searchNearby", self.places_base_url);
        self.post_search("places:searchNearby", &url, field_mask, &body)
            .await
    }

    /// Sends a search request and normalizes the returned places.
    async fn post_search<B: Serialize>(
        &self,
        endpoint: &'static str,
        url: &str,
        field_mask: &FieldMask,
        body: &B,
    ) -> Result<SearchResult, PlacesError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, field_mask.header_value())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: SearchPlacesResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: endpoint.to_string(),
                source: e,
            })?;

        Ok(SearchResult {
            places: normalize_places(parsed.places),
        })
    }
}

/// Builds the wire circle, clamping the radius to the API maximum.
fn location_area(circle: Circle) -> LocationArea {
    LocationArea {
        circle: CircleArea {
            center: LatLng {
                latitude: circle.center.latitude,
                longitude: circle.center.longitude,
            },
            radius: clamp_radius(circle.radius_meters),
        },
    }
}

/// Validates a base URL and strips trailing slashes so endpoint paths can be
/// appended with a single `/`.
fn normalise_base_url(raw: &str) -> Result<String, PlacesError> {
    let trimmed = raw.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}

pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
