//! Optional request filters for text and nearby search.

use triptap_core::Coordinate;

/// Largest radius the Places API accepts for a circle, in meters.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

/// Clamp a radius into `0..=MAX_RADIUS_METERS`.
///
/// Oversized values are capped rather than rejected. Negative and NaN values
/// become `0.0`.
#[must_use]
pub fn clamp_radius(radius_meters: f64) -> f64 {
    if radius_meters.is_nan() {
        return 0.0;
    }
    radius_meters.clamp(0.0, MAX_RADIUS_METERS)
}

/// A circular search area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl Circle {
    #[must_use]
    pub fn new(center: Coordinate, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSearchFilters {
    /// Only return places rated at least this high.
    pub min_rating: Option<f64>,
    /// Restrict results to one place type.
    pub included_type: Option<String>,
    /// Prefer (but do not restrict to) results inside this circle.
    pub location_bias: Option<Circle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbySearchFilters {
    pub min_rating: Option<f64>,
    /// Restrict results to any of these place types. Empty means no restriction.
    pub included_types: Vec<String>,
    pub max_result_count: Option<u32>,
}
