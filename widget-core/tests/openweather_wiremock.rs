//! OpenWeather client and widget behaviour against a mock HTTP server.

use std::sync::Arc;

use widget_core::{
    ErrorKind, OpenWeatherClient, Query, Units, WeatherError, WeatherProvider, Widget,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const WEATHER_PATH: &str = "/data/2.5/weather";

fn london_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "base": "stations",
        "main": {"temp": 18.4, "feels_like": 17.9, "temp_min": 16.0, "temp_max": 20.1, "pressure": 1014, "humidity": 60},
        "visibility": 10000,
        "wind": {"speed": 3.1, "deg": 250},
        "clouds": {"all": 0},
        "dt": 1_700_000_000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1699946000, "sunset": 1699978000},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

fn create_test_client(mock_server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("TEST_KEY".to_string())
        .with_base_url(format!("{}{WEATHER_PATH}", mock_server.uri()))
}

fn create_test_widget(mock_server: &MockServer) -> Widget {
    Widget::new(Arc::new(create_test_client(mock_server)), Units::Metric)
}

async fn setup_weather_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_city_lookup_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current(&Query::City("London".into())).await;

    let reading = result.expect("expected success");
    assert_eq!(reading.name, "London");
    assert!((reading.main.temp - 18.4).abs() < f64::EPSILON);
    assert_eq!(reading.main.humidity, 60);
}

#[tokio::test]
async fn test_coordinate_lookup_sends_lat_lon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).with_units(Units::Imperial);
    let result = client
        .current(&Query::Coordinates { lat: 51.5085, lon: -0.1257 })
        .await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_widget_renders_london() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(london_response()),
    )
    .await;

    let widget = create_test_widget(&mock_server);
    widget.submit("London").await;

    let view = widget.view();
    let result = view.result().expect("result view visible");
    assert_eq!(result.location, "London, GB");
    assert_eq!(result.temperature, "18°C");
    assert_eq!(result.description, "clear sky");
    assert_eq!(result.feels_like, "18°C");
    assert_eq!(result.humidity, "60%");
    assert_eq!(result.wind_speed, "3.1 m/s");
    assert!(view.error().is_none());
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_widget_coordinates_fill_input_with_resolved_name() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(london_response()),
    )
    .await;

    let widget = create_test_widget(&mock_server);
    widget.show_coordinates(51.5085, -0.1257).await;

    assert_eq!(widget.view().input, "London");
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_not_found_is_classified() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(404).set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.current(&Query::City("Atlantis".into())).await;

    assert!(
        matches!(result, Err(WeatherError::NotFound)),
        "Expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_widget_shows_not_found() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(404)).await;

    let widget = create_test_widget(&mock_server);
    widget.submit("Atlantis").await;

    let view = widget.view();
    assert_eq!(
        view.error(),
        Some("City not found. Please check the spelling and try again.")
    );
    assert!(view.result().is_none());
}

#[tokio::test]
async fn test_widget_shows_invalid_credentials() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(401)).await;

    let widget = create_test_widget(&mock_server);
    widget.submit("London").await;

    assert_eq!(
        widget.view().error(),
        Some("Invalid API key. Please check your configuration.")
    );
}

#[tokio::test]
async fn test_server_error_is_generic_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client
        .current(&Query::City("London".into()))
        .await
        .expect_err("500 must fail");

    assert_eq!(err.kind(), ErrorKind::Failed);
    assert_eq!(
        err.to_string(),
        "Failed to fetch weather data. Please try again later."
    );
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.current(&Query::City("London".into())).await;

    assert!(
        matches!(result, Err(WeatherError::Parse(_))),
        "Expected Parse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_empty_conditions_is_parse_error() {
    let mock_server = MockServer::start().await;
    let mut body = london_response();
    body["weather"] = serde_json::json!([]);
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let result = client.current(&Query::City("London".into())).await;

    assert!(
        matches!(result, Err(WeatherError::Parse(_))),
        "Expected Parse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = OpenWeatherClient::new("TEST_KEY".into()).with_base_url(format!("{uri}{WEATHER_PATH}"));
    let result = client.current(&Query::City("London".into())).await;

    assert!(
        matches!(result, Err(WeatherError::Request(_))),
        "Expected Request, got: {result:?}"
    );
}

// ============================================================================
// Input validation scenarios
// ============================================================================

#[tokio::test]
async fn test_blank_input_sends_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let widget = create_test_widget(&mock_server);
    widget.submit(" \t ").await;

    assert_eq!(widget.view().error(), Some("Please enter a city name"));
    mock_server.verify().await;
}
