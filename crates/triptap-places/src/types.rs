//! Wire types for the Places API (new) and the legacy Maps Places API.
//!
//! Request bodies are serialized from the `*Request` structs; responses are
//! deserialized into the `Api*`/`Legacy*` structs and then normalized into
//! [`crate::PlaceRecord`] by [`crate::normalize`]. Every response field is
//! optional because the field mask decides which ones come back.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircleArea {
    pub center: LatLng,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationArea {
    pub circle: CircleArea,
}

// ---------------------------------------------------------------------------
// places:searchText
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchRequest<'a> {
    pub text_query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationArea>,
}

// ---------------------------------------------------------------------------
// places:searchNearby
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest<'a> {
    pub location_restriction: LocationArea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub included_types: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u32>,
}

/// Response of both search endpoints. The API omits `places` entirely when
/// nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPlacesResponse {
    #[serde(default)]
    pub places: Vec<ApiPlace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlace {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub business_status: Option<String>,
    pub primary_type: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub price_level: Option<String>,
    pub website_uri: Option<String>,
    pub google_maps_uri: Option<String>,
    pub editorial_summary: Option<LocalizedText>,
    pub good_for_children: Option<bool>,
}

// ---------------------------------------------------------------------------
// Legacy place/details/json
// ---------------------------------------------------------------------------

/// Envelope of the legacy details endpoint: `{"status": "OK", "result": {...}}`.
#[derive(Debug, Deserialize)]
pub struct LegacyDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<LegacyPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LegacyLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyGeometry {
    pub location: LegacyLatLng,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<LegacyGeometry>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub price_level: Option<u8>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub editorial_summary: Option<LegacyEditorialSummary>,
}
