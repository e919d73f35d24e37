//! Normalized place record shared by every search component.

use serde::{Deserialize, Serialize};
use triptap_core::Coordinate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BusinessStatus {
    /// Parse the API's status string. Unrecognized or missing values map to
    /// [`BusinessStatus::Unknown`].
    #[must_use]
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("OPERATIONAL") => Self::Operational,
            Some("CLOSED_TEMPORARILY") => Self::ClosedTemporarily,
            Some("CLOSED_PERMANENTLY") => Self::ClosedPermanently,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessStatus::Operational => write!(f, "OPERATIONAL"),
            BusinessStatus::ClosedTemporarily => write!(f, "CLOSED_TEMPORARILY"),
            BusinessStatus::ClosedPermanently => write!(f, "CLOSED_PERMANENTLY"),
            BusinessStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl PriceLevel {
    /// Parse a Places API (new) price level such as `"PRICE_LEVEL_MODERATE"`.
    ///
    /// `PRICE_LEVEL_UNSPECIFIED` and unknown values yield `None`.
    #[must_use]
    pub fn from_places_api(value: &str) -> Option<Self> {
        match value {
            "PRICE_LEVEL_FREE" => Some(Self::Free),
            "PRICE_LEVEL_INEXPENSIVE" => Some(Self::Inexpensive),
            "PRICE_LEVEL_MODERATE" => Some(Self::Moderate),
            "PRICE_LEVEL_EXPENSIVE" => Some(Self::Expensive),
            "PRICE_LEVEL_VERY_EXPENSIVE" => Some(Self::VeryExpensive),
            _ => None,
        }
    }

    /// Parse the legacy API's `0..=4` integer price level.
    #[must_use]
    pub fn from_legacy(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Free),
            1 => Some(Self::Inexpensive),
            2 => Some(Self::Moderate),
            3 => Some(Self::Expensive),
            4 => Some(Self::VeryExpensive),
            _ => None,
        }
    }
}

/// A place as returned by text, nearby, or details search, normalized to the
/// subset of fields the planner uses. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub display_name: String,
    pub formatted_address: String,
    pub location: Coordinate,
    /// Average rating; `0.0` when the API did not report one.
    pub rating: f64,
    pub user_rating_count: u32,
    pub business_status: BusinessStatus,
    /// Empty when the API did not report a primary type.
    pub primary_type: String,
    pub types: Vec<String>,
    pub price_level: Option<PriceLevel>,
    pub website_uri: Option<String>,
    pub maps_uri: Option<String>,
    pub editorial_summary: Option<String>,
    pub good_for_children: Option<bool>,
}

impl PlaceRecord {
    /// Minimal record with the given identity and location; every other
    /// field carries its "not reported" value.
    #[must_use]
    pub fn new(id: &str, display_name: &str, location: Coordinate) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            formatted_address: String::new(),
            location,
            rating: 0.0,
            user_rating_count: 0,
            business_status: BusinessStatus::Unknown,
            primary_type: String::new(),
            types: Vec::new(),
            price_level: None,
            website_uri: None,
            maps_uri: None,
            editorial_summary: None,
            good_for_children: None,
        }
    }

    #[must_use]
    pub fn has_type(&self, place_type: &str) -> bool {
        self.types.iter().any(|t| t == place_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_status_parses_known_values() {
        assert_eq!(
            BusinessStatus::from_api(Some("OPERATIONAL")),
            BusinessStatus::Operational
        );
        assert_eq!(
            BusinessStatus::from_api(Some("CLOSED_PERMANENTLY")),
            BusinessStatus::ClosedPermanently
        );
        assert_eq!(BusinessStatus::from_api(Some("BOGUS")), BusinessStatus::Unknown);
        assert_eq!(BusinessStatus::from_api(None), BusinessStatus::Unknown);
    }

    #[test]
    fn price_level_parses_both_schemas() {
        assert_eq!(
            PriceLevel::from_places_api("PRICE_LEVEL_MODERATE"),
            Some(PriceLevel::Moderate)
        );
        assert_eq!(PriceLevel::from_places_api("PRICE_LEVEL_UNSPECIFIED"), None);
        assert_eq!(PriceLevel::from_legacy(4), Some(PriceLevel::VeryExpensive));
        assert_eq!(PriceLevel::from_legacy(9), None);
    }

    #[test]
    fn has_type_checks_membership() {
        let mut place = PlaceRecord::new("p1", "Cafe", Coordinate::new(0.0, 0.0));
        place.types = vec!["cafe".into(), "food".into()];
        assert!(place.has_type("food"));
        assert!(!place.has_type("bar"));
    }
}
