//! Column-oriented itinerary data, as produced by the itinerary generator.
//!
//! The generator returns one list per column (`location`, `description`,
//! `activity_type`, and optionally `day`), all of the same length. This module
//! loads that shape from JSON or YAML and turns it into row-oriented
//! [`ItineraryEntry`] values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::ItineraryEntry;
use crate::ConfigError;

pub const LOCATION_COLUMN: &str = "location";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const ACTIVITY_TYPE_COLUMN: &str = "activity_type";
pub const DAY_COLUMN: &str = "day";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryColumns {
    pub location: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub activity_type: Vec<String>,
    #[serde(default)]
    pub day: Vec<String>,
}

impl ItineraryColumns {
    /// Number of itinerary entries described by the columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.location.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_empty()
    }

    /// Convert the columns into one [`ItineraryEntry`] per row.
    ///
    /// Optional columns may be omitted entirely; when present they must have
    /// the same length as `location`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a present column's length does
    /// not match the `location` column.
    pub fn into_entries(self) -> Result<Vec<ItineraryEntry>, ConfigError> {
        let rows = self.location.len();
        for (name, len) in [
            (DESCRIPTION_COLUMN, self.description.len()),
            (ACTIVITY_TYPE_COLUMN, self.activity_type.len()),
            (DAY_COLUMN, self.day.len()),
        ] {
            if len != 0 && len != rows {
                return Err(ConfigError::Validation(format!(
                    "itinerary column '{name}' has {len} values but '{LOCATION_COLUMN}' has {rows}"
                )));
            }
        }

        let mut description = self.description.into_iter();
        let mut activity_type = self.activity_type.into_iter();
        let mut day = self.day.into_iter();

        Ok(self
            .location
            .into_iter()
            .map(|location_name| ItineraryEntry {
                location_name,
                description: description.next().unwrap_or_default(),
                activity_type: activity_type.next().unwrap_or_default(),
                day: day.next(),
            })
            .collect())
    }
}

/// Load itinerary columns from a JSON or YAML file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; anything else is
/// parsed as JSON.
///
/// # Errors
///
/// Returns [`ConfigError::ItineraryFileIo`] if the file cannot be read and
/// [`ConfigError::ItineraryFileParse`] if its contents do not match
/// [`ItineraryColumns`].
pub fn load_itinerary(path: &Path) -> Result<ItineraryColumns, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ItineraryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| ConfigError::ItineraryFileParse {
        path: path.display().to_string(),
        reason,
    })
}
