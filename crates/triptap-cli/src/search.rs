//! `search` and `geocode` command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use triptap_core::{load_itinerary, AppConfig};
use triptap_places::{PlacesClient, PlacesConfig};
use triptap_search::{
    GeoLookup, NominatimGeocoder, SearchOptions, SearchOrchestrator, SearchOutcome,
};

pub(crate) const PLACES_FILE: &str = "places.json";
pub(crate) const NEARBY_FILE: &str = "nearby_places.json";

#[derive(Debug)]
pub(crate) struct SearchArgs {
    pub city: String,
    pub itinerary: PathBuf,
    pub radius: Option<f64>,
    pub single_thread: bool,
    pub output_dir: Option<PathBuf>,
    pub fetch_details: bool,
    pub verbose: bool,
}

/// Runs a full search for an itinerary file and prints a per-stop summary.
///
/// # Errors
///
/// Returns an error if the itinerary cannot be loaded, a client cannot be
/// built, the city cannot be geocoded, or the result files cannot be written.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let entries = load_itinerary(&args.itinerary)?.into_entries()?;
    if entries.is_empty() {
        anyhow::bail!("itinerary {} has no stops", args.itinerary.display());
    }

    let client = PlacesClient::new(&PlacesConfig::from_app_config(config))
        .context("failed to build places client")?;
    let geocoder =
        NominatimGeocoder::from_app_config(config).context("failed to build geocoder")?;

    let options = SearchOptions {
        fetch_anchor_details: args.fetch_details,
        verbose: args.verbose,
        ..SearchOptions::from_app_config(config)
    };
    let radius = args.radius.unwrap_or(options.radius_meters);
    let orchestrator = SearchOrchestrator::new(client, options);

    let outcome = orchestrator
        .search(&geocoder, &args.city, &entries, radius, args.single_thread)
        .await?;

    print!("{}", render_summary(&outcome));

    if let Some(dir) = args.output_dir.as_deref() {
        let (places, nearby) = write_results(dir, &outcome)?;
        tracing::info!(
            places = %places.display(),
            nearby = %nearby.display(),
            anchors = outcome.anchors.len(),
            "wrote search results"
        );
        println!("wrote {} and {}", places.display(), nearby.display());
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the geocoder cannot be built, the lookup fails, or the
/// city has no match.
pub(crate) async fn run_geocode(config: &AppConfig, city: &str) -> anyhow::Result<()> {
    let geocoder =
        NominatimGeocoder::from_app_config(config).context("failed to build geocoder")?;
    match geocoder.resolve(city).await? {
        Some(coordinate) => println!("{city}: {coordinate}"),
        None => anyhow::bail!("unable to get coordinates for city: {city}"),
    }
    Ok(())
}

pub(crate) fn render_summary(outcome: &SearchOutcome) -> String {
    let mut out = format!(
        "city center {} | {} stops resolved\n",
        outcome.city_coordinate,
        outcome.anchors.len()
    );
    for anchor in &outcome.anchors {
        let nearby = outcome
            .nearby
            .get(&anchor.location_name)
            .map_or_else(|| "nearby search failed".to_string(), |p| format!("{} nearby", p.len()));
        out.push_str(&format!(
            "  {} -> {} [{}] rating {:.1} ({}) | {nearby}\n",
            anchor.location_name,
            anchor.place.display_name,
            anchor.place.primary_type,
            anchor.place.rating,
            anchor.place.user_rating_count,
        ));
    }
    for (category, calls) in outcome.tally.iter() {
        out.push_str(&format!("{category} API calls: {calls}\n"));
    }
    out.push_str(&format!("total API calls: {}\n", outcome.total_api_calls()));
    out
}

/// Writes `places.json` (`{"results": [...anchors]}`) and
/// `nearby_places.json` (the nearby index) into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written.
pub(crate) fn write_results(
    dir: &Path,
    outcome: &SearchOutcome,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let places_path = dir.join(PLACES_FILE);
    let places = serde_json::json!({ "results": outcome.anchors });
    std::fs::write(&places_path, serde_json::to_string_pretty(&places)?)
        .with_context(|| format!("failed to write {}", places_path.display()))?;

    let nearby_path = dir.join(NEARBY_FILE);
    std::fs::write(&nearby_path, serde_json::to_string_pretty(&outcome.nearby)?)
        .with_context(|| format!("failed to write {}", nearby_path.display()))?;

    Ok((places_path, nearby_path))
}
