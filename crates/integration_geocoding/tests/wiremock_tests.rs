//! Integration tests for the geocoding client (wiremock-based)

use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

const fn sample_search_json() -> &'static str {
    r#"[
        {
            "place_id": 1,
            "display_name": "Esplanada dos Ministérios, Zona Cívico-Administrativa, Brasília",
            "lat": "-15.7997",
            "lon": "-47.8645",
            "importance": 0.61
        },
        {
            "place_id": 2,
            "display_name": "Eixo Monumental, Brasília",
            "lat": "-15.7921",
            "lon": "-47.8837",
            "importance": 0.43
        }
    ]"#
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Esplanada"))
        .and(query_param("format", "json"))
        .and(query_param("countrycodes", "br"))
        .and(query_param("limit", "5"))
        .and(query_param("addressdetails", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_search_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let suggestions = client.search("Esplanada").await.unwrap();

    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0].display_name.starts_with("Esplanada"));
    assert!((suggestions[0].latitude - -15.7997).abs() < 1e-9);
    assert!((suggestions[0].longitude - -47.8645).abs() < 1e-9);
}

#[tokio::test]
async fn test_empty_query_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.search("").await.unwrap().is_empty());
    assert!(client.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.search("Brasília").await;

    assert!(matches!(
        result,
        Err(GeocodingError::HttpStatus { status: 503 })
    ));
}

#[tokio::test]
async fn test_search_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.search("Brasília").await;

    assert!(matches!(result, Err(GeocodingError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_search_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unexpected": true}"#))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.search("Brasília").await;

    assert!(matches!(result, Err(GeocodingError::ParseError(_))));
}

#[tokio::test]
async fn test_reverse_geocode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "-15.7997"))
        .and(query_param("lon", "-47.8645"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "display_name": "Esplanada dos Ministérios, Brasília",
                "address": {
                    "road": "Esplanada dos Ministérios",
                    "neighbourhood": "Zona Cívico-Administrativa",
                    "city": "Brasília"
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let details = client.reverse_geocode(-15.7997, -47.8645).await.unwrap();

    assert_eq!(
        details.format_label(),
        "Esplanada dos Ministérios, S/N, Zona Cívico-Administrativa - Brasília"
    );
}

#[tokio::test]
async fn test_reverse_geocode_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"error": "Unable to geocode"}"#),
        )
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.reverse_geocode(0.0, 0.0).await;

    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}
