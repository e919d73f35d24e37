//! Typed clients for the Google Places API (new) and the legacy Maps Places
//! endpoints.
//!
//! The clients own transport concerns only: request construction, the API key
//! and field-mask headers, status checks, and normalization of the wire schema
//! into [`PlaceRecord`]. Every operation returns `Result<_, PlacesError>`;
//! callers decide what a failure means.

pub mod client;
pub mod error;
pub mod field_mask;
pub mod filters;
pub mod normalize;
pub mod place;
pub mod types;

mod details;

pub use client::{PlacesClient, PlacesConfig, SearchResult};
pub use error::PlacesError;
pub use field_mask::FieldMask;
pub use filters::{clamp_radius, Circle, NearbySearchFilters, TextSearchFilters, MAX_RADIUS_METERS};
pub use place::{BusinessStatus, PlaceRecord, PriceLevel};
