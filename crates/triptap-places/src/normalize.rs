//! Normalization of Places API wire types into [`PlaceRecord`].

use triptap_core::Coordinate;

use crate::place::{BusinessStatus, PlaceRecord, PriceLevel};
use crate::types::{ApiPlace, LegacyPlace};

/// Converts a Places API (new) place into a [`PlaceRecord`].
///
/// Returns `None` when the place has no `id` or no `location`; such a record
/// cannot act as an anchor or be deduplicated, so it is not usable.
#[must_use]
pub fn normalize_place(place: ApiPlace) -> Option<PlaceRecord> {
    let id = place.id.filter(|id| !id.is_empty())?;
    let location = place.location?;

    Some(PlaceRecord {
        id,
        display_name: place.display_name.map(|t| t.text).unwrap_or_default(),
        formatted_address: place.formatted_address.unwrap_or_default(),
        location: Coordinate::new(location.latitude, location.longitude),
        rating: place.rating.unwrap_or(0.0),
        user_rating_count: place.user_rating_count.unwrap_or(0),
        business_status: BusinessStatus::from_api(place.business_status.as_deref()),
        primary_type: place.primary_type.unwrap_or_default(),
        types: place.types,
        price_level: place
            .price_level
            .as_deref()
            .and_then(PriceLevel::from_places_api),
        website_uri: place.website_uri,
        maps_uri: place.google_maps_uri,
        editorial_summary: place.editorial_summary.map(|t| t.text),
        good_for_children: place.good_for_children,
    })
}

/// Normalizes a page of search results, dropping unusable places.
#[must_use]
pub fn normalize_places(places: Vec<ApiPlace>) -> Vec<PlaceRecord> {
    let total = places.len();
    let records: Vec<PlaceRecord> = places.into_iter().filter_map(normalize_place).collect();
    if records.len() != total {
        tracing::debug!(
            dropped = total - records.len(),
            total,
            "dropped places without id or location"
        );
    }
    records
}

/// Converts a legacy details result into a [`PlaceRecord`].
///
/// The legacy schema has no primary type; the first entry of `types` stands
/// in for it.
#[must_use]
pub fn normalize_legacy_place(place: LegacyPlace) -> Option<PlaceRecord> {
    let id = place.place_id.filter(|id| !id.is_empty())?;
    let location = place.geometry?.location;
    let primary_type = place.types.first().cloned().unwrap_or_default();

    Some(PlaceRecord {
        id,
        display_name: place.name.unwrap_or_default(),
        formatted_address: place.formatted_address.unwrap_or_default(),
        location: Coordinate::new(location.lat, location.lng),
        rating: place.rating.unwrap_or(0.0),
        user_rating_count: place.user_ratings_total.unwrap_or(0),
        business_status: BusinessStatus::from_api(place.business_status.as_deref()),
        primary_type,
        types: place.types,
        price_level: place.price_level.and_then(PriceLevel::from_legacy),
        website_uri: place.website,
        maps_uri: place.url,
        editorial_summary: place.editorial_summary.and_then(|s| s.overview),
        good_for_children: None,
    })
}
