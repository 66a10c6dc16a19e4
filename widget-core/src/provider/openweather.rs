use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{Query, Units, WeatherReading},
};

use super::WeatherProvider;

/// Client for the OpenWeather current-weather endpoint.
///
/// One GET per lookup; no retry, timeout or caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::default(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    fn query_params(&self, query: &Query) -> Vec<(&'static str, String)> {
        let mut params = match query {
            Query::City(city) => vec![("q", city.clone())],
            Query::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_str().to_string()));
        params
    }

    #[instrument(skip_all, fields(query = %query, units = %self.units))]
    async fn fetch_current(&self, query: &Query) -> Result<WeatherReading, WeatherError> {
        debug!(url = %self.base_url, "Fetching current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(WeatherError::from_status(status));
        }

        let reading: WeatherReading = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("Failed to parse OpenWeather JSON: {e}")))?;

        if reading.condition().is_none() {
            return Err(WeatherError::Parse(
                "OpenWeather response contained no weather conditions".to_string(),
            ));
        }

        Ok(reading)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &Query) -> Result<WeatherReading, WeatherError> {
        self.fetch_current(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
