//! Point-of-interest categories eligible for nearby-search restriction.
//!
//! An anchor's `types` often include broad or administrative tags
//! (`locality`, `political`, `point_of_interest`) that the nearby endpoint
//! either rejects or matches far too widely. Only tags on this list are passed
//! as `includedTypes`.

pub const POI_CATEGORIES: &[&str] = &[
    "restaurant",
    "bakery",
    "sandwich_shop",
    "coffee_shop",
    "cafe",
    "fast_food_restaurant",
    "breakfast_restaurant",
    "brunch_restaurant",
    "ice_cream_shop",
    "bar",
    "pub",
    "wine_bar",
    "night_club",
    "store",
    "book_store",
    "shopping_mall",
    "museum",
    "art_gallery",
    "tourist_attraction",
    "historical_landmark",
    "park",
    "hiking_area",
    "zoo",
    "aquarium",
    "amusement_park",
    "movie_theater",
    "performing_arts_theater",
    "spa",
];

#[must_use]
pub fn is_poi_category(place_type: &str) -> bool {
    POI_CATEGORIES.contains(&place_type)
}

/// The anchor types that are POI categories, in the anchor's order, without
/// duplicates. Empty means the nearby search runs unrestricted.
#[must_use]
pub fn category_restriction(anchor_types: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in anchor_types {
        if is_poi_category(t) && !out.contains(t) {
            out.push(t.clone());
        }
    }
    out
}
