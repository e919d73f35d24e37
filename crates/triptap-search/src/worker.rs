//! Per-entry resolution: anchor lookup with query fallback, then the nearby
//! search around that anchor.
//!
//! A worker never returns an error. Every upstream failure is logged, ends the
//! remaining steps for that entry, and is still counted in the tally the
//! worker hands back.

use triptap_core::{Coordinate, ItineraryEntry};
use triptap_places::{
    Circle, FieldMask, NearbySearchFilters, PlaceRecord, PlacesClient, TextSearchFilters,
};

use crate::categories::category_restriction;
use crate::filter::{evaluate, FilterCriteria};
use crate::orchestrator::SearchOptions;
use crate::session::SharedSession;
use crate::tally::{ApiCallTally, CallCategory};

/// Run-wide inputs every worker shares.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub city: String,
    pub center: Coordinate,
    pub radius_meters: f64,
}

/// What one entry cost and produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryOutcome {
    pub tally: ApiCallTally,
    pub resolved: bool,
    /// Accepted candidates, or `None` when the nearby search never completed.
    pub nearby_count: Option<usize>,
}

/// Text-search queries to try for `entry`, in order, without duplicates.
///
/// The primary form names the place; the secondary form describes the
/// activity. A form whose inputs are all blank is skipped.
#[must_use]
pub fn fallback_queries(entry: &ItineraryEntry, city: &str) -> Vec<String> {
    let mut queries = Vec::with_capacity(2);

    let location = entry.location_name.trim();
    if !location.is_empty() {
        queries.push(format!("{location} in {city}"));
    }

    let activity = entry.activity_type.trim();
    let description = entry.description.trim();
    if !(activity.is_empty() && description.is_empty()) {
        let secondary = format!("{activity} at {description} in {city}");
        if !queries.contains(&secondary) {
            queries.push(secondary);
        }
    }

    queries
}

#[derive(Clone)]
pub struct ResolutionWorker {
    client: PlacesClient,
    field_mask: FieldMask,
    criteria: FilterCriteria,
    location_bias_meters: Option<f64>,
    fetch_anchor_details: bool,
    verbose: bool,
}

impl ResolutionWorker {
    #[must_use]
    pub fn new(client: PlacesClient, options: &SearchOptions) -> Self {
        Self {
            client,
            field_mask: options.field_mask.clone(),
            criteria: options.criteria,
            location_bias_meters: options.location_bias_meters,
            fetch_anchor_details: options.fetch_anchor_details,
            verbose: options.verbose,
        }
    }

    /// Resolves `entry`, records the anchor and accepted nearby candidates in
    /// `session`, and returns the calls spent.
    pub async fn run(
        &self,
        ctx: &SearchContext,
        entry: &ItineraryEntry,
        session: &SharedSession,
    ) -> EntryOutcome {
        let mut outcome = EntryOutcome::default();
        let name = entry.location_name.as_str();

        let Some(mut anchor) = self.resolve_anchor(ctx, entry, &mut outcome.tally).await else {
            tracing::warn!(entry = %name, city = %ctx.city, "no place found for itinerary entry");
            return outcome;
        };

        if self.fetch_anchor_details {
            self.refresh_anchor(&mut anchor, &mut outcome.tally).await;
        }

        tracing::debug!(
            entry = %name,
            place_id = %anchor.id,
            primary_type = %anchor.primary_type,
            "resolved anchor"
        );
        session.with(|s| s.record_anchor(name, anchor.clone()));
        outcome.resolved = true;

        let Some(accepted) = self.find_nearby(ctx, name, &anchor, &mut outcome.tally).await else {
            return outcome;
        };

        outcome.nearby_count = Some(accepted.len());
        session.with(|s| s.record_nearby(name, &anchor.primary_type, accepted));
        outcome
    }

    async fn resolve_anchor(
        &self,
        ctx: &SearchContext,
        entry: &ItineraryEntry,
        tally: &mut ApiCallTally,
    ) -> Option<PlaceRecord> {
        let filters = TextSearchFilters {
            min_rating: None,
            included_type: None,
            location_bias: self
                .location_bias_meters
                .map(|radius| Circle::new(ctx.center, radius)),
        };

        for query in fallback_queries(entry, &ctx.city) {
            tally.record(CallCategory::Places);
            match self
                .client
                .text_search(&query, &self.field_mask, &filters)
                .await
            {
                Ok(result) => {
                    if let Some(place) = result.places.into_iter().next() {
                        return Some(place);
                    }
                    tracing::debug!(query = %query, "text search returned no places");
                }
                Err(err) => {
                    tracing::warn!(
                        call = "text_search",
                        query = %query,
                        error = %err,
                        "places API call failed"
                    );
                }
            }
        }

        None
    }

    /// Fills optional fields the search response left empty from the legacy
    /// details endpoint. Identity, location and category are kept as-is.
    async fn refresh_anchor(&self, anchor: &mut PlaceRecord, tally: &mut ApiCallTally) {
        tally.record(CallCategory::Maps);
        match self.client.details(&anchor.id, &self.field_mask).await {
            Ok(details) => {
                if anchor.website_uri.is_none() {
                    anchor.website_uri = details.website_uri;
                }
                if anchor.maps_uri.is_none() {
                    anchor.maps_uri = details.maps_uri;
                }
                if anchor.editorial_summary.is_none() {
                    anchor.editorial_summary = details.editorial_summary;
                }
                if anchor.price_level.is_none() {
                    anchor.price_level = details.price_level;
                }
            }
            Err(err) => {
                tracing::warn!(
                    call = "details",
                    place_id = %anchor.id,
                    error = %err,
                    "legacy maps API call failed"
                );
            }
        }
    }

    async fn find_nearby(
        &self,
        ctx: &SearchContext,
        name: &str,
        anchor: &PlaceRecord,
        tally: &mut ApiCallTally,
    ) -> Option<Vec<PlaceRecord>> {
        let filters = NearbySearchFilters {
            min_rating: Some(self.criteria.min_rating),
            included_types: category_restriction(&anchor.types),
            max_result_count: None,
        };

        tally.record(CallCategory::Places);
        let result = match self
            .client
            .nearby_search(anchor.location, ctx.radius_meters, &self.field_mask, &filters)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    call = "nearby_search",
                    entry = %name,
                    error = %err,
                    "places API call failed"
                );
                return None;
            }
        };

        let accepted = result
            .places
            .into_iter()
            .filter(|candidate| match evaluate(anchor, candidate, true, &self.criteria) {
                Ok(()) => true,
                Err(reason) => {
                    if self.verbose {
                        tracing::info!(
                            entry = %name,
                            candidate = %candidate.display_name,
                            %reason,
                            "rejected nearby candidate"
                        );
                    } else {
                        tracing::debug!(
                            entry = %name,
                            candidate = %candidate.display_name,
                            %reason,
                            "rejected nearby candidate"
                        );
                    }
                    false
                }
            })
            .collect();

        Some(accepted)
    }
}
