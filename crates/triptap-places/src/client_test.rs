use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::new(&PlacesConfig::new("test-key").with_base_url(base_url))
        .expect("client construction should not fail")
}

#[test]
fn base_url_trailing_slash_is_stripped() {
    let client = test_client("https://places.example.com/v1/");
    assert_eq!(client.places_base_url, "https://places.example.com/v1");
    assert_eq!(client.maps_base_url, "https://places.example.com/v1");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::new(&PlacesConfig::new("k").with_base_url("not a url"));
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn location_area_clamps_radius() {
    let area = location_area(Circle::new(Coordinate::new(1.0, 2.0), 999_999.0));
    assert!((area.circle.radius - 50_000.0).abs() < f64::EPSILON);
    assert!((area.circle.center.latitude - 1.0).abs() < f64::EPSILON);
}

#[test]
fn text_search_request_omits_unset_filters() {
    let body = TextSearchRequest {
        text_query: "Louvre in Paris",
        min_rating: None,
        included_type: None,
        location_bias: None,
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "textQuery": "Louvre in Paris" }));
}

#[test]
fn nearby_request_serializes_included_types_only_when_present() {
    let area = location_area(Circle::new(Coordinate::new(1.0, 2.0), 100.0));
    let types: Vec<String> = Vec::new();
    let body = NearbySearchRequest {
        location_restriction: area,
        min_rating: Some(3.5),
        included_types: &types,
        max_result_count: None,
    };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("includedTypes").is_none());
    assert_eq!(json["minRating"], 3.5);
    assert_eq!(json["locationRestriction"]["circle"]["radius"], 100.0);
}

#[test]
fn truncate_body_limits_length() {
    let long = "x".repeat(2_000);
    assert_eq!(truncate_body(&long).len(), MAX_ERROR_BODY_CHARS);
    assert_eq!(truncate_body("short"), "short");
}

#[test]
fn config_debug_redacts_api_key() {
    let rendered = format!("{:?}", PlacesConfig::new("super-secret"));
    assert!(!rendered.contains("super-secret"));
}
