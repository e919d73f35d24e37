//! Legacy Maps `place/details/json` endpoint.
//!
//! Superseded by the richer fields returned from text and nearby search, but
//! still used by callers that hold a place id and want a refreshed record.
//! Billed against the Maps quota rather than the Places quota.

use crate::client::{truncate_body, PlacesClient};
use crate::error::PlacesError;
use crate::field_mask::FieldMask;
use crate::normalize::normalize_legacy_place;
use crate::place::PlaceRecord;
use crate::types::LegacyDetailsResponse;

const DETAILS_ENDPOINT: &str = "place/details/json";

impl PlacesClient {
    /// Fetches one place by id from the legacy details endpoint.
    ///
    /// `field_mask` uses Places API (new) names; they are translated to legacy
    /// names (see [`FieldMask::legacy_fields`]).
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NotFound`] if the API reports `NOT_FOUND`, or the
    ///   result lacks an id or location.
    /// - [`PlacesError::ApiStatus`] for any other non-`OK` status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx response.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn details(
        &self,
        place_id: &str,
        field_mask: &FieldMask,
    ) -> Result<PlaceRecord, PlacesError> {
        let url = format!("{}/{DETAILS_ENDPOINT}", self.maps_base_url);
        let fields = field_mask.legacy_fields();

        tracing::debug!(place_id, fields = %fields, "legacy place details");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", fields.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                endpoint: DETAILS_ENDPOINT,
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let envelope: LegacyDetailsResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: format!("{DETAILS_ENDPOINT}(place_id={place_id})"),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => {}
            "NOT_FOUND" | "ZERO_RESULTS" => {
                return Err(PlacesError::NotFound {
                    place_id: place_id.to_owned(),
                })
            }
            _ => {
                return Err(PlacesError::ApiStatus {
                    endpoint: DETAILS_ENDPOINT,
                    status: envelope.status,
                    message: envelope
                        .error_message
                        .unwrap_or_else(|| "no error message".to_string()),
                })
            }
        }

        envelope
            .result
            .and_then(normalize_legacy_place)
            .ok_or_else(|| PlacesError::NotFound {
                place_id: place_id.to_owned(),
            })
    }
}
