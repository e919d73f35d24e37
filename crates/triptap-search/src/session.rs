//! Aggregated results of one search run and the guard that protects them.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use triptap_places::PlaceRecord;

use crate::tally::ApiCallTally;

/// The place an itinerary entry resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorRecord {
    pub location_name: String,
    pub place: PlaceRecord,
}

/// Accepted nearby candidates keyed by itinerary `location_name`.
pub type NearbyIndex = BTreeMap<String, Vec<PlaceRecord>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSession {
    pub anchors: Vec<AnchorRecord>,
    pub nearby: NearbyIndex,
    pub tally: ApiCallTally,
}

impl SearchSession {
    pub fn record_anchor(&mut self, location_name: &str, place: PlaceRecord) {
        self.anchors.push(AnchorRecord {
            location_name: location_name.to_owned(),
            place,
        });
    }

    /// Appends accepted candidates under `location_name` and re-establishes
    /// the presentation order for that key (see [`order_candidates`]).
    ///
    /// Candidates already present under the key, or matching any anchor
    /// recorded for the key, are skipped. Two itinerary entries may share a
    /// location name, so this cannot assume the key is fresh.
    pub fn record_nearby(
        &mut self,
        location_name: &str,
        anchor_primary_type: &str,
        candidates: Vec<PlaceRecord>,
    ) {
        let anchor_ids: Vec<&str> = self
            .anchors
            .iter()
            .filter(|a| a.location_name == location_name)
            .map(|a| a.place.id.as_str())
            .collect();

        let mut merged = self.nearby.remove(location_name).unwrap_or_default();
        // A later anchor for this key may already be stored as a candidate.
        merged.retain(|p| !anchor_ids.contains(&p.id.as_str()));
        for candidate in candidates {
            let duplicate = merged.iter().any(|p| p.id == candidate.id);
            if !duplicate && !anchor_ids.contains(&candidate.id.as_str()) {
                merged.push(candidate);
            }
        }

        self.nearby.insert(
            location_name.to_owned(),
            order_candidates(merged, anchor_primary_type),
        );
    }
}

/// Sorts candidates by `primary_type` (stable, so ties keep filter order),
/// then moves the first candidate sharing the anchor's primary type to the
/// front.
#[must_use]
pub fn order_candidates(
    mut candidates: Vec<PlaceRecord>,
    anchor_primary_type: &str,
) -> Vec<PlaceRecord> {
    candidates.sort_by(|a, b| a.primary_type.cmp(&b.primary_type));

    if anchor_primary_type.is_empty() {
        return candidates;
    }

    let Some(index) = candidates
        .iter()
        .position(|p| p.primary_type == anchor_primary_type)
    else {
        return candidates;
    };

    let mut ordered = Vec::with_capacity(candidates.len());
    let mut rest = Vec::with_capacity(candidates.len().saturating_sub(1));
    for (i, place) in candidates.into_iter().enumerate() {
        if i == index {
            ordered.push(place);
        } else {
            rest.push(place);
        }
    }
    ordered.extend(rest);
    ordered
}

/// Session shared by concurrent workers.
///
/// All access goes through [`SharedSession::with`], whose closure is
/// synchronous, so the lock can never be held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<Mutex<SearchSession>>);

impl SharedSession {
    /// Runs `f` with exclusive access to the session.
    ///
    /// A panic in another holder does not make the session unusable; every
    /// mutation is a single append or insert.
    pub fn with<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Takes the finished session out of the guard.
    #[must_use]
    pub fn into_inner(self) -> SearchSession {
        match Arc::try_unwrap(self.0) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
