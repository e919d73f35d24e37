//! Acceptability rules for nearby candidates.
//!
//! A candidate qualifies as an alternative to an anchor only if it is well
//! rated, has enough ratings to trust that score, is open for business,
//! belongs to one of the anchor's categories, and is not the anchor itself.

use triptap_places::{BusinessStatus, PlaceRecord};

pub const DEFAULT_MIN_RATING: f64 = 3.5;
pub const DEFAULT_MIN_RATING_COUNT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub min_rating: f64,
    pub min_rating_count: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_rating: DEFAULT_MIN_RATING,
            min_rating_count: DEFAULT_MIN_RATING_COUNT,
        }
    }
}

/// Why a candidate was turned down. Only the first failing check is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    LowRating { rating: f64, min_rating: f64 },
    FewRatings { count: u32, min_count: u32 },
    NotOperational(BusinessStatus),
    CategoryMismatch { primary_type: String },
    SelfMatch,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::LowRating { rating, min_rating } => {
                write!(f, "rating {rating} below minimum {min_rating}")
            }
            Rejection::FewRatings { count, min_count } => {
                write!(f, "{count} ratings below minimum {min_count}")
            }
            Rejection::NotOperational(status) => write!(f, "business status is {status}"),
            Rejection::CategoryMismatch { primary_type } => {
                write!(f, "primary type '{primary_type}' not among anchor types")
            }
            Rejection::SelfMatch => write!(f, "candidate is the anchor itself"),
        }
    }
}

/// Checks `candidate` against `anchor`, returning the first failed rule.
///
/// Checks run in this order: rating, rating count, business status, category
/// (only when `compare_types` is set), self-match. The rating and count
/// floors are inclusive: a value equal to the minimum passes.
///
/// # Errors
///
/// Returns the [`Rejection`] for the first rule the candidate fails.
pub fn evaluate(
    anchor: &PlaceRecord,
    candidate: &PlaceRecord,
    compare_types: bool,
    criteria: &FilterCriteria,
) -> Result<(), Rejection> {
    if candidate.rating < criteria.min_rating {
        return Err(Rejection::LowRating {
            rating: candidate.rating,
            min_rating: criteria.min_rating,
        });
    }

    if candidate.user_rating_count < criteria.min_rating_count {
        return Err(Rejection::FewRatings {
            count: candidate.user_rating_count,
            min_count: criteria.min_rating_count,
        });
    }

    if candidate.business_status != BusinessStatus::Operational {
        return Err(Rejection::NotOperational(candidate.business_status));
    }

    if compare_types && !anchor.has_type(&candidate.primary_type) {
        return Err(Rejection::CategoryMismatch {
            primary_type: candidate.primary_type.clone(),
        });
    }

    if candidate.id == anchor.id {
        return Err(Rejection::SelfMatch);
    }

    Ok(())
}

/// Boolean form of [`evaluate`].
#[must_use]
pub fn is_acceptable(
    anchor: &PlaceRecord,
    candidate: &PlaceRecord,
    compare_types: bool,
    min_rating: f64,
    min_rating_count: u32,
) -> bool {
    let criteria = FilterCriteria {
        min_rating,
        min_rating_count,
    };
    evaluate(anchor, candidate, compare_types, &criteria).is_ok()
}
