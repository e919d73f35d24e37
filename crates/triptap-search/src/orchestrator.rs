//! Fan-out of [`ResolutionWorker`] over a whole itinerary.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use triptap_core::{default_max_concurrency, AppConfig, Coordinate, ItineraryEntry};
use triptap_places::{FieldMask, PlacesClient};

use crate::error::SearchError;
use crate::filter::FilterCriteria;
use crate::geocode::GeoLookup;
use crate::session::{AnchorRecord, NearbyIndex, SharedSession};
use crate::tally::ApiCallTally;
use crate::worker::{EntryOutcome, ResolutionWorker, SearchContext};

pub const DEFAULT_RADIUS_METERS: f64 = 1_500.0;
pub const DEFAULT_LOCATION_BIAS_METERS: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Used by [`SearchOrchestrator::search_default`].
    pub radius_meters: f64,
    pub criteria: FilterCriteria,
    /// Upper bound on entries in flight in concurrent mode.
    pub max_concurrency: usize,
    /// Biases anchor text searches toward a circle of this radius around the
    /// city center. `None` sends no bias.
    pub location_bias_meters: Option<f64>,
    /// Refresh each anchor through the legacy details endpoint.
    pub fetch_anchor_details: bool,
    /// Log rejected nearby candidates at `info` instead of `debug`.
    pub verbose: bool,
    pub field_mask: FieldMask,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            criteria: FilterCriteria::default(),
            max_concurrency: default_max_concurrency(),
            location_bias_meters: Some(DEFAULT_LOCATION_BIAS_METERS),
            fetch_anchor_details: false,
            verbose: false,
            field_mask: FieldMask::default_places(),
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            radius_meters: config.search_radius_meters,
            criteria: FilterCriteria {
                min_rating: config.min_rating,
                min_rating_count: config.min_rating_count,
            },
            max_concurrency: config.max_concurrent_entries.max(1),
            ..Self::default()
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// In completion order; deterministic only for single-thread runs.
    pub anchors: Vec<AnchorRecord>,
    pub nearby: NearbyIndex,
    pub city_coordinate: Coordinate,
    pub tally: ApiCallTally,
}

impl SearchOutcome {
    #[must_use]
    pub fn total_api_calls(&self) -> u64 {
        self.tally.total()
    }

    /// `(anchors, nearby, city_coordinate, total_api_calls)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<AnchorRecord>, NearbyIndex, Coordinate, u64) {
        let total = self.total_api_calls();
        (self.anchors, self.nearby, self.city_coordinate, total)
    }
}

pub struct SearchOrchestrator {
    client: PlacesClient,
    options: SearchOptions,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(client: PlacesClient, options: SearchOptions) -> Self {
        Self { client, options }
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// [`search`](Self::search) with the configured radius, concurrently.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub async fn search_default<G: GeoLookup>(
        &self,
        geo: &G,
        city: &str,
        entries: &[ItineraryEntry],
    ) -> Result<SearchOutcome, SearchError> {
        self.search(geo, city, entries, self.options.radius_meters, false)
            .await
    }

    /// Resolves every entry of the itinerary around `city`.
    ///
    /// Entry-level failures only shrink the result. With `single_thread`
    /// entries run one after another in input order; otherwise up to
    /// `max_concurrency` run at once on the tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`SearchError::CityNotFound`] if the geocoder has no match for `city`.
    /// - [`SearchError::Geocode`] if the geocoder itself fails.
    pub async fn search<G: GeoLookup>(
        &self,
        geo: &G,
        city: &str,
        entries: &[ItineraryEntry],
        radius_meters: f64,
        single_thread: bool,
    ) -> Result<SearchOutcome, SearchError> {
        let center = geo
            .resolve(city)
            .await?
            .ok_or_else(|| SearchError::CityNotFound {
                city: city.to_owned(),
            })?;

        tracing::info!(
            city,
            center = %center,
            entries = entries.len(),
            radius_meters,
            single_thread,
            "starting place search"
        );

        let ctx = SearchContext {
            city: city.to_owned(),
            center,
            radius_meters,
        };
        let worker = ResolutionWorker::new(self.client.clone(), &self.options);
        let shared = SharedSession::default();

        let outcomes = if single_thread {
            run_sequential(&worker, &ctx, entries, &shared).await
        } else {
            run_concurrent(
                worker,
                ctx,
                entries,
                &shared,
                self.options.max_concurrency.max(1),
            )
            .await
        };

        let mut tally = ApiCallTally::default();
        let mut unresolved: usize = 0;
        for (name, outcome) in &outcomes {
            tracing::info!(
                entry = %name,
                resolved = outcome.resolved,
                nearby = ?outcome.nearby_count,
                api_calls = outcome.tally.total(),
                "entry finished"
            );
            if !outcome.resolved {
                unresolved += 1;
            }
            tally.merge(&outcome.tally);
        }

        let mut session = shared.into_inner();
        session.tally = tally;

        if unresolved > 0 {
            tracing::warn!(
                unresolved,
                total_entries = entries.len(),
                "some itinerary entries could not be resolved"
            );
        }
        tracing::info!(
            anchors = session.anchors.len(),
            total_api_calls = session.tally.total(),
            "place search finished"
        );

        Ok(SearchOutcome {
            anchors: session.anchors,
            nearby: session.nearby,
            city_coordinate: center,
            tally: session.tally,
        })
    }
}

async fn run_sequential(
    worker: &ResolutionWorker,
    ctx: &SearchContext,
    entries: &[ItineraryEntry],
    shared: &SharedSession,
) -> Vec<(String, EntryOutcome)> {
    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let outcome = worker.run(ctx, entry, shared).await;
        outcomes.push((entry.location_name.clone(), outcome));
    }
    outcomes
}

async fn run_concurrent(
    worker: ResolutionWorker,
    ctx: SearchContext,
    entries: &[ItineraryEntry],
    shared: &SharedSession,
    max_concurrency: usize,
) -> Vec<(String, EntryOutcome)> {
    let worker = Arc::new(worker);
    let ctx = Arc::new(ctx);

    let joined: Vec<_> = stream::iter(entries.iter().cloned())
        .map(|entry| {
            let worker = Arc::clone(&worker);
            let ctx = Arc::clone(&ctx);
            let session = shared.clone();
            tokio::spawn(async move {
                let outcome = worker.run(&ctx, &entry, &session).await;
                (entry.location_name, outcome)
            })
        })
        .buffer_unordered(max_concurrency)
        .collect()
        .await;

    let mut outcomes = Vec::with_capacity(joined.len());
    for result in joined {
        match result {
            Ok(pair) => outcomes.push(pair),
            Err(err) => tracing::error!(error = %err, "search worker task failed"),
        }
    }
    outcomes
}
