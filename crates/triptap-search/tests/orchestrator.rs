//! End-to-end search runs against a mocked places API and a stub geocoder.

use triptap_core::{Coordinate, ItineraryEntry};
use triptap_places::{PlacesClient, PlacesConfig};
use triptap_search::{
    CallCategory, GeoLookup, GeocodeError, SearchError, SearchOptions, SearchOrchestrator,
    SearchOutcome,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARIS: Coordinate = Coordinate {
    latitude: 48.8566,
    longitude: 2.3522,
};

struct FixedCity(Option<Coordinate>);

impl GeoLookup for FixedCity {
    async fn resolve(&self, _city: &str) -> Result<Option<Coordinate>, GeocodeError> {
        Ok(self.0)
    }
}

struct RateLimitedGeocoder;

impl GeoLookup for RateLimitedGeocoder {
    async fn resolve(&self, _city: &str) -> Result<Option<Coordinate>, GeocodeError> {
        Err(GeocodeError::RateLimited)
    }
}

#[allow(clippy::too_many_arguments)]
fn place(
    id: &str,
    primary_type: &str,
    types: &[&str],
    lat: f64,
    lng: f64,
    rating: f64,
    count: u32,
    status: &str,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "displayName": { "text": id },
        "location": { "latitude": lat, "longitude": lng },
        "rating": rating,
        "userRatingCount": count,
        "businessStatus": status,
        "primaryType": primary_type,
        "types": types,
    })
}

fn louvre() -> serde_json::Value {
    place(
        "louvre",
        "museum",
        &["museum", "art_gallery", "tourist_attraction", "point_of_interest"],
        48.8606,
        2.3376,
        4.7,
        300_000,
        "OPERATIONAL",
    )
}

fn flore() -> serde_json::Value {
    place(
        "flore",
        "cafe",
        &["cafe", "coffee_shop", "point_of_interest"],
        48.854,
        2.3325,
        4.1,
        12_000,
        "OPERATIONAL",
    )
}

fn itinerary() -> Vec<ItineraryEntry> {
    vec![
        ItineraryEntry::new("Louvre", "art museum", "visit"),
        ItineraryEntry::new("Nowhere Bistro", "imaginary dinner", "eat"),
        ItineraryEntry::new("Cafe de Flore", "historic cafe", "coffee"),
    ]
}

async fn mount_text_search(server: &MockServer, query: &str, places: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(body_partial_json(serde_json::json!({ "textQuery": query })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "places": places })),
        )
        .mount(server)
        .await;
}

async fn mount_nearby(server: &MockServer, lat: f64, lng: f64, places: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "locationRestriction": { "circle": { "center": { "latitude": lat, "longitude": lng } } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "places": places })),
        )
        .mount(server)
        .await;
}

/// Any text query without a dedicated mock finds nothing.
async fn mount_text_search_fallthrough(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .with_priority(10)
        .mount(server)
        .await;
}

async fn paris_server() -> MockServer {
    let server = MockServer::start().await;

    mount_text_search(&server, "Louvre in Paris", serde_json::json!([louvre()])).await;
    mount_text_search(&server, "Cafe de Flore in Paris", serde_json::json!([flore()])).await;
    mount_text_search_fallthrough(&server).await;

    mount_nearby(
        &server,
        48.8606,
        2.3376,
        serde_json::json!([
            louvre(),
            place("tuileries", "tourist_attraction", &["tourist_attraction", "park"], 48.8635, 2.327, 4.6, 90_000, "OPERATIONAL"),
            place("orsay", "museum", &["museum"], 48.86, 2.3266, 4.7, 110_000, "OPERATIONAL"),
            place("orangerie", "museum", &["museum"], 48.8638, 2.3227, 4.6, 30_000, "OPERATIONAL"),
            place("lowrated", "art_gallery", &["art_gallery"], 48.86, 2.34, 3.0, 400, "OPERATIONAL"),
            place("closed", "museum", &["museum"], 48.86, 2.34, 4.8, 5_000, "CLOSED_TEMPORARILY"),
            place("galerie", "art_gallery", &["art_gallery"], 48.861, 2.335, 4.5, 1_200, "OPERATIONAL"),
            place("club", "night_club", &["night_club"], 48.861, 2.335, 4.5, 1_200, "OPERATIONAL")
        ]),
    )
    .await;

    mount_nearby(
        &server,
        48.854,
        2.3325,
        serde_json::json!([
            flore(),
            place("magots", "cafe", &["cafe"], 48.854, 2.333, 4.0, 9_000, "OPERATIONAL"),
            place("tiny", "cafe", &["cafe"], 48.854, 2.334, 4.9, 20, "OPERATIONAL")
        ]),
    )
    .await;

    server
}

fn orchestrator(server: &MockServer, options: SearchOptions) -> SearchOrchestrator {
    let client = PlacesClient::new(&PlacesConfig::new("test-key").with_base_url(&server.uri()))
        .expect("client construction should not fail");
    SearchOrchestrator::new(client, options)
}

fn anchor_ids(outcome: &SearchOutcome) -> Vec<String> {
    let mut ids: Vec<String> = outcome
        .anchors
        .iter()
        .map(|a| format!("{}={}", a.location_name, a.place.id))
        .collect();
    ids.sort();
    ids
}

fn nearby_ids(outcome: &SearchOutcome, name: &str) -> Vec<String> {
    outcome.nearby[name].iter().map(|p| p.id.clone()).collect()
}

#[tokio::test]
async fn unresolvable_entry_is_skipped_without_aborting_the_run() {
    let server = paris_server().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &itinerary(), 1_500.0, true)
        .await
        .expect("search should succeed");

    assert_eq!(
        anchor_ids(&outcome),
        vec!["Cafe de Flore=flore".to_string(), "Louvre=louvre".to_string()]
    );
    assert!(!outcome.nearby.contains_key("Nowhere Bistro"));
    assert_eq!(outcome.city_coordinate, PARIS);
}

#[tokio::test]
async fn nearby_candidates_are_filtered_sorted_and_same_category_first() {
    let server = paris_server().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap();

    // lowrated, closed, club and the anchor itself are rejected; the first
    // museum moves ahead of the art gallery.
    assert_eq!(
        nearby_ids(&outcome, "Louvre"),
        vec!["orsay", "galerie", "orangerie", "tuileries"]
    );
    assert_eq!(nearby_ids(&outcome, "Cafe de Flore"), vec!["magots"]);
}

#[tokio::test]
async fn api_calls_count_two_per_resolved_and_two_per_exhausted_entry() {
    let server = paris_server().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap();

    // Louvre and Flore: text + nearby. Nowhere Bistro: both fallback queries.
    assert_eq!(outcome.tally.get(CallCategory::Places), 6);
    assert_eq!(outcome.tally.get(CallCategory::Maps), 0);
    assert_eq!(outcome.total_api_calls(), 6);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 6);
}

#[tokio::test]
async fn oversized_radius_is_capped_in_the_request() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Louvre in Paris", serde_json::json!([louvre()])).await;
    Mock::given(method("POST"))
        .and(path("/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "locationRestriction": { "circle": { "radius": 50000.0 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server, SearchOptions::default());
    let entries = vec![ItineraryEntry::new("Louvre", "art museum", "visit")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 999_999.0, true)
        .await
        .unwrap();

    assert_eq!(outcome.anchors.len(), 1);
    assert!(outcome.nearby["Louvre"].is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_and_single_thread_runs_agree_on_content() {
    let server = paris_server().await;
    let orch = orchestrator(&server, SearchOptions::default());
    let city = FixedCity(Some(PARIS));

    let sequential = orch
        .search(&city, "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap();
    let concurrent = orch
        .search(&city, "Paris", &itinerary(), 1_500.0, false)
        .await
        .unwrap();

    assert_eq!(anchor_ids(&sequential), anchor_ids(&concurrent));
    assert_eq!(sequential.nearby, concurrent.nearby);
    assert_eq!(sequential.tally, concurrent.tally);
}

#[tokio::test]
async fn single_thread_runs_are_repeatable() {
    let server = paris_server().await;
    let orch = orchestrator(&server, SearchOptions::default());
    let city = FixedCity(Some(PARIS));

    let first = orch
        .search(&city, "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap();
    let second = orch
        .search(&city, "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first.anchors).unwrap(),
        serde_json::to_string(&second.anchors).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.nearby).unwrap(),
        serde_json::to_string(&second.nearby).unwrap()
    );
    // Single-thread anchors keep itinerary order.
    let names: Vec<&str> = first
        .anchors
        .iter()
        .map(|a| a.location_name.as_str())
        .collect();
    assert_eq!(names, vec!["Louvre", "Cafe de Flore"]);
}

#[tokio::test]
async fn secondary_query_resolves_when_primary_misses() {
    let server = MockServer::start().await;
    mount_text_search(
        &server,
        "coffee at historic cafe in Paris",
        serde_json::json!([flore()]),
    )
    .await;
    mount_text_search_fallthrough(&server).await;
    mount_nearby(&server, 48.854, 2.3325, serde_json::json!([])).await;

    let orch = orchestrator(&server, SearchOptions::default());
    let entries = vec![ItineraryEntry::new("Flore", "historic cafe", "coffee")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 1_500.0, true)
        .await
        .unwrap();

    assert_eq!(anchor_ids(&outcome), vec!["Flore=flore".to_string()]);
    assert_eq!(outcome.total_api_calls(), 3);
}

#[tokio::test]
async fn nearby_request_carries_rating_floor_and_anchor_categories() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Louvre in Paris", serde_json::json!([louvre()])).await;
    Mock::given(method("POST"))
        .and(path("/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "minRating": 3.5,
            "includedTypes": ["museum", "art_gallery", "tourist_attraction"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server, SearchOptions::default());
    let entries = vec![ItineraryEntry::new("Louvre", "art museum", "visit")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 1_500.0, true)
        .await
        .unwrap();

    // Only a matching request produces the empty (present) key.
    assert!(outcome.nearby["Louvre"].is_empty());
}

#[tokio::test]
async fn failed_primary_query_is_counted_and_secondary_still_tried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(body_partial_json(serde_json::json!({ "textQuery": "Flore in Paris" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .expect(1)
        .mount(&server)
        .await;
    mount_text_search(
        &server,
        "coffee at historic cafe in Paris",
        serde_json::json!([flore()]),
    )
    .await;
    mount_nearby(&server, 48.854, 2.3325, serde_json::json!([])).await;

    let orch = orchestrator(&server, SearchOptions::default());
    let entries = vec![ItineraryEntry::new("Flore", "historic cafe", "coffee")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 1_500.0, true)
        .await
        .unwrap();

    assert_eq!(anchor_ids(&outcome), vec!["Flore=flore".to_string()]);
    assert_eq!(outcome.tally.get(CallCategory::Places), 3);
    assert_eq!(outcome.total_api_calls(), 3);
}

#[tokio::test]
async fn city_miss_fails_the_whole_run() {
    let server = MockServer::start().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let err = orch
        .search(&FixedCity(None), "Atlantis", &itinerary(), 1_500.0, false)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::CityNotFound { ref city } if city == "Atlantis"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn geocoder_failure_is_reported() {
    let server = MockServer::start().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let err = orch
        .search(&RateLimitedGeocoder, "Paris", &itinerary(), 1_500.0, true)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Geocode(GeocodeError::RateLimited)));
}

#[tokio::test]
async fn nearby_failure_keeps_anchor_and_counts_the_attempt() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Louvre in Paris", serde_json::json!([louvre()])).await;
    Mock::given(method("POST"))
        .and(path("/places:searchNearby"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let orch = orchestrator(&server, SearchOptions::default());
    let entries = vec![ItineraryEntry::new("Louvre", "art museum", "visit")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 1_500.0, false)
        .await
        .unwrap();

    assert_eq!(outcome.anchors.len(), 1);
    assert!(!outcome.nearby.contains_key("Louvre"));
    assert_eq!(outcome.total_api_calls(), 2);
}

#[tokio::test]
async fn anchor_details_are_fetched_and_counted_as_maps_calls() {
    let server = MockServer::start().await;
    mount_text_search(&server, "Louvre in Paris", serde_json::json!([louvre()])).await;
    mount_nearby(&server, 48.8606, 2.3376, serde_json::json!([])).await;
    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "louvre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "place_id": "louvre",
                "name": "Louvre Museum",
                "geometry": { "location": { "lat": 48.8606, "lng": 2.3376 } },
                "website": "https://www.louvre.fr",
                "types": ["museum"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = SearchOptions {
        fetch_anchor_details: true,
        ..SearchOptions::default()
    };
    let orch = orchestrator(&server, options);
    let entries = vec![ItineraryEntry::new("Louvre", "art museum", "visit")];
    let outcome = orch
        .search(&FixedCity(Some(PARIS)), "Paris", &entries, 1_500.0, true)
        .await
        .unwrap();

    let anchor = &outcome.anchors[0].place;
    assert_eq!(anchor.website_uri.as_deref(), Some("https://www.louvre.fr"));
    assert_eq!(anchor.primary_type, "museum");
    assert_eq!(outcome.tally.get(CallCategory::Places), 2);
    assert_eq!(outcome.tally.get(CallCategory::Maps), 1);
}

#[tokio::test]
async fn empty_itinerary_only_geocodes() {
    let server = MockServer::start().await;
    let orch = orchestrator(&server, SearchOptions::default());

    let outcome = orch
        .search_default(&FixedCity(Some(PARIS)), "Paris", &[])
        .await
        .unwrap();

    assert!(outcome.anchors.is_empty());
    assert!(outcome.nearby.is_empty());
    assert_eq!(outcome.total_api_calls(), 0);
}
