use crate::{Config, Query, WeatherError, WeatherReading, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current conditions. The widget only ever talks to this trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<WeatherReading, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let client = OpenWeatherClient::new(api_key)
        .with_base_url(config.base_url())
        .with_units(config.units);

    Ok(Arc::new(client))
}
