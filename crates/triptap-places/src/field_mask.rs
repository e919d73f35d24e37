//! Response field masks.
//!
//! The Places API (new) bills by the fields requested, so every search names
//! the fields it wants via the `X-Goog-FieldMask` header. The legacy details
//! endpoint takes the same idea as a `fields` query parameter with different
//! field names.

/// Fields requested by default for text and nearby search.
///
/// `places.id` and `places.types` are required by the acceptability filter.
pub const DEFAULT_FIELDS: &[&str] = &[
    "places.id",
    "places.formattedAddress",
    "places.displayName",
    "places.location",
    "places.rating",
    "places.googleMapsUri",
    "places.websiteUri",
    "places.businessStatus",
    "places.priceLevel",
    "places.userRatingCount",
    "places.primaryType",
    "places.types",
    "places.editorialSummary",
    "places.goodForChildren",
];

/// Smallest mask that still yields a usable [`crate::PlaceRecord`].
pub const BASIC_FIELDS: &[&str] = &[
    "places.id",
    "places.formattedAddress",
    "places.displayName",
    "places.location",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMask(Vec<String>);

impl FieldMask {
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn default_places() -> Self {
        Self::new(DEFAULT_FIELDS.iter().copied())
    }

    #[must_use]
    pub fn basic() -> Self {
        Self::new(BASIC_FIELDS.iter().copied())
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Value for the `X-Goog-FieldMask` header. An empty mask falls back to
    /// [`BASIC_FIELDS`].
    #[must_use]
    pub fn header_value(&self) -> String {
        if self.0.is_empty() {
            BASIC_FIELDS.join(",")
        } else {
            self.0.join(",")
        }
    }

    /// Value for the legacy details `fields` parameter.
    ///
    /// Strips the `places.` prefix and translates to legacy field names.
    /// Fields without a legacy equivalent (such as `primaryType`) are dropped.
    #[must_use]
    pub fn legacy_fields(&self) -> String {
        let source: Vec<&str> = if self.0.is_empty() {
            BASIC_FIELDS.to_vec()
        } else {
            self.0.iter().map(String::as_str).collect()
        };

        let mut out: Vec<&str> = Vec::with_capacity(source.len());
        for field in source {
            let bare = field.strip_prefix("places.").unwrap_or(field);
            let Some(legacy) = legacy_name(bare) else {
                continue;
            };
            if !out.contains(&legacy) {
                out.push(legacy);
            }
        }
        out.join(",")
    }
}

impl Default for FieldMask {
    fn default() -> Self {
        Self::default_places()
    }
}

fn legacy_name(field: &str) -> Option<&str> {
    let name = match field {
        "id" => "place_id",
        "displayName" => "name",
        "formattedAddress" => "formatted_address",
        "location" => "geometry/location",
        "userRatingCount" => "user_ratings_total",
        "businessStatus" => "business_status",
        "priceLevel" => "price_level",
        "websiteUri" => "website",
        "googleMapsUri" => "url",
        "editorialSummary" => "editorial_summary",
        "primaryType" | "goodForChildren" => return None,
        other => other,
    };
    Some(name)
}
