use serde::{Deserialize, Serialize};

/// A WGS84 point, as returned by the geocoder and the places API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// One stop of a generated itinerary.
///
/// `location_name` is the name the itinerary generator gave the place; it is
/// also the key used for the stop's nearby results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub location_name: String,
    pub description: String,
    pub activity_type: String,
    /// Day label from the itinerary (e.g. `"1"`), carried for presentation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

impl ItineraryEntry {
    #[must_use]
    pub fn new(location_name: &str, description: &str, activity_type: &str) -> Self {
        Self {
            location_name: location_name.to_owned(),
            description: description.to_owned(),
            activity_type: activity_type.to_owned(),
            day: None,
        }
    }
}
