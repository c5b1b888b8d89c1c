//! Integration tests for the OpenWeatherMap client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn springfield_mo() -> serde_json::Value {
    serde_json::json!([{
        "name": "Springfield",
        "local_names": {"en": "Springfield"},
        "lat": 37.2153,
        "lon": -93.2982,
        "country": "US",
        "state": "Missouri"
    }])
}

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -93.2982, "lat": 37.2153},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 21.4, "feels_like": 21.0, "humidity": 48, "pressure": 1017},
        "wind": {"speed": 3.6, "deg": 180},
        "name": "Springfield",
        "cod": 200
    })
}

fn sample_history_response() -> serde_json::Value {
    serde_json::json!({
        "message": "Count: 2",
        "cod": "200",
        "city_id": 4409896,
        "cnt": 2,
        "list": [
            {"dt": 1680964200, "main": {"temp": 12.1}},
            {"dt": 1680967800, "main": {"temp": 13.4}}
        ]
    })
}

fn create_test_client(mock_server: &MockServer) -> OpenWeatherMapClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        ..WeatherConfig::default()
    };
    OpenWeatherMapClient::new(config).expect("Failed to create client")
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn geocode_ambiguous_city_without_codes_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.geocode("Springfield").await;

    match result {
        Err(WeatherError::LocationNotFound(query)) => assert_eq!(query, "Springfield"),
        other => panic!("Expected LocationNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn geocode_with_state_and_country_resolves() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield,MO,US"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_mo()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let location = client
        .geocode("Springfield,MO,US")
        .await
        .expect("Should resolve");

    assert_eq!(location.name, "Springfield");
    assert!((location.lat - 37.2153).abs() < 1e-6);
    assert!((location.lon + 93.2982).abs() < 1e-6);
    assert_eq!(location.country.as_deref(), Some("US"));
}

#[tokio::test]
async fn geocode_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.geocode("Paris").await;

    match result {
        Err(WeatherError::Unauthorized(message)) => assert!(message.contains("Invalid API key")),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

// ============================================================================
// Current / Forecast
// ============================================================================

#[tokio::test]
async fn current_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "37.2153"))
        .and(query_param("lon", "-93.2982"))
        .and(query_param("units", "metric"))
        .and(query_param_is_missing("exclude"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let weather = client
        .get_current(37.2153, -93.2982, &[])
        .await
        .expect("Should succeed");

    assert_eq!(weather["name"], "Springfield");
    assert_eq!(weather["weather"][0]["main"], "Clear");
}

#[tokio::test]
async fn current_weather_passes_exclude() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("exclude", "minutely,alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let exclude = vec!["minutely".to_string(), "alerts".to_string()];
    assert!(client.get_current(37.2, -93.3, &exclude).await.is_ok());
}

#[tokio::test]
async fn current_weather_url_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/custom/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        current_url: Some(format!("{}/custom/onecall", mock_server.uri())),
        ..WeatherConfig::default()
    };
    let client = OpenWeatherMapClient::new(config).unwrap();

    assert!(client.get_current(10.0, 10.0, &[]).await.is_ok());
}

#[tokio::test]
async fn forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "cnt": 1,
            "list": [{"dt": 1700000000, "main": {"temp": 9.5}}],
            "city": {"name": "Berlin"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_forecast(52.52, 13.405, &[]).await.unwrap();
    assert_eq!(forecast["city"]["name"], "Berlin");
}

#[tokio::test]
async fn invalid_coordinates_never_hit_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(95.0, 0.0, &[]).await;
    assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn history_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/history/city"))
        .and(query_param("type", "hour"))
        .and(query_param("start", "1680964200"))
        .and(query_param("cnt", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_history_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let history = client
        .get_history(37.2153, -93.2982, "hour", 1_680_964_200, 2)
        .await
        .unwrap();
    assert_eq!(history["cnt"], 2);
}

#[tokio::test]
async fn history_not_subscribed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/history/city"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "cod": 403,
            "message": "Your subscription does not allow this request"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_history(1.0, 1.0, "day", 0, 5).await;
    assert!(matches!(result, Err(WeatherError::NotSubscribed(_))));
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn rate_limit_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(52.52, 13.405, &[]).await;
    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn server_error_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(52.52, 13.405, &[]).await;

    match result {
        Err(WeatherError::ServiceUnavailable(message)) => assert!(message.contains("503")),
        other => panic!("Expected ServiceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.geocode("Oslo").await;
    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn timeout_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_current_response())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 1,
        ..WeatherConfig::default()
    };
    let client = OpenWeatherMapClient::new(config).unwrap();

    let result = client.get_current(1.0, 1.0, &[]).await;
    assert!(matches!(result, Err(WeatherError::Timeout)));
}

#[tokio::test]
async fn health_check_uses_geocoding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_mo()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn health_check_fails_on_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_healthy().await);
}
