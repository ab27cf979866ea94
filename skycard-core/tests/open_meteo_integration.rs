//! Integration tests for the Open-Meteo provider using wiremock.

use reqwest::Url;
use skycard_core::provider::open_meteo::OpenMeteoProvider;
use skycard_core::{Condition, LookupError, Session, SessionState, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenMeteoProvider {
    let base = server.uri();
    OpenMeteoProvider::new(
        Url::parse(&format!("{base}/v1/search")).unwrap(),
        Url::parse(&format!("{base}/v1/forecast")).unwrap(),
        "en",
    )
}

async fn mount_paris_geocoding(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "id": 2988507,
                "name": "Paris",
                "country": "FR",
                "latitude": 48.85,
                "longitude": 2.35
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_paris_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param(
            "current",
            "temperature_2m,apparent_temperature,weather_code,relative_humidity_2m,wind_speed_10m,surface_pressure",
        ))
        .and(query_param("wind_speed_unit", "ms"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.34,
            "current": {
                "time": "2026-10-19T10:00",
                "interval": 900,
                "temperature_2m": 18.2,
                "apparent_temperature": 17.5,
                "weather_code": 61,
                "relative_humidity_2m": 70,
                "wind_speed_10m": 3.4,
                "surface_pressure": 1012
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_returns_first_result() {
    let server = MockServer::start().await;
    mount_paris_geocoding(&server).await;

    let place = provider_for(&server).resolve("  Paris ").await.unwrap();

    assert_eq!(place.name, "Paris");
    assert_eq!(place.country, "FR");
    assert!(place.latitude.is_finite());
    assert!(place.longitude.is_finite());
    assert_eq!(place.latitude, 48.85);
}

#[tokio::test]
async fn test_resolve_empty_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.4
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).resolve("Qwxyzzyx").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { ref query } if query == "Qwxyzzyx"));
}

#[tokio::test]
async fn test_resolve_server_error_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = provider_for(&server).resolve("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { .. }));
}

#[tokio::test]
async fn test_resolve_unparsable_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server).resolve("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { ref query } if query == "Paris"));
}

#[tokio::test]
async fn test_resolve_unreachable_is_not_found() {
    // Nothing listens on the discard port.
    let provider = OpenMeteoProvider::new(
        Url::parse("http://127.0.0.1:9/v1/search").unwrap(),
        Url::parse("http://127.0.0.1:9/v1/forecast").unwrap(),
        "en",
    );

    let err = provider.resolve("Paris").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { .. }));
}

#[tokio::test]
async fn test_fetch_normalizes_current_conditions() {
    let server = MockServer::start().await;
    mount_paris_geocoding(&server).await;
    mount_paris_forecast(&server).await;

    let provider = provider_for(&server);
    let place = provider.resolve("Paris").await.unwrap();
    let record = provider.fetch(&place).await.unwrap();

    assert_eq!(record.city, "Paris");
    assert_eq!(record.country, "FR");
    assert_eq!(record.temperature, 18.2);
    assert_eq!(record.feels_like, 17.5);
    assert_eq!(record.condition, Condition::Rainy);
    assert_eq!(record.icon, "10d");
    assert_eq!(record.humidity, 70);
    assert_eq!(record.wind_speed, 3.4);
    assert_eq!(record.pressure, 1012.0);
    assert_eq!(record.visibility, 10_000.0);
}

#[tokio::test]
async fn test_fetch_server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let place = skycard_core::Place {
        name: "Paris".into(),
        country: "FR".into(),
        latitude: 48.85,
        longitude: 2.35,
    };
    let err = provider_for(&server).fetch(&place).await.unwrap_err();

    match err {
        LookupError::ProviderUnavailable { reason } => {
            assert!(reason.contains("503"));
            assert!(reason.contains("maintenance"));
        }
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temperature_2m": 10.0 }
        })))
        .mount(&server)
        .await;

    let place = skycard_core::Place {
        name: "Paris".into(),
        country: "FR".into(),
        latitude: 48.85,
        longitude: 2.35,
    };
    let err = provider_for(&server).fetch(&place).await.unwrap_err();

    assert!(matches!(err, LookupError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_session_paris_scenario() {
    let server = MockServer::start().await;
    mount_paris_geocoding(&server).await;
    mount_paris_forecast(&server).await;

    let provider = provider_for(&server);
    let mut session = Session::new();

    let notification = session.submit(&provider, "Paris").await.unwrap();

    assert!(!notification.is_error());
    let record = session.record().unwrap();
    assert_eq!(record.condition.label(), "rainy");
    assert_eq!(record.humidity, 70);
}

#[tokio::test]
async fn test_session_unknown_city_never_calls_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let mut session = Session::new();

    let notification = session.submit(&provider, "Qwxyzzyx").await.unwrap();

    assert!(notification.is_error());
    assert_eq!(session.state(), &SessionState::Idle);
}
