use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WeatherError;

/// What to look up: a city by name or a point on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Query {
    /// Build a city query from raw input, trimming surrounding whitespace.
    pub fn city(input: &str) -> Result<Self, WeatherError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }
        Ok(Query::City(city.to_string()))
    }

    pub fn coordinates(lat: f64, lon: f64) -> Result<Self, WeatherError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(Query::Coordinates { lat, lon })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::City(city) => f.write_str(city),
            Query::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

/// Unit system requested from the API. Decides the suffixes the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            Units::Metric | Units::Standard => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// Current conditions as returned by the OpenWeather `weather` endpoint.
///
/// Only the fields the widget displays are modelled; the rest of the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub name: String,
    #[serde(default)]
    pub sys: Sys,
    pub main: Main,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    /// Observation time, unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub coord: Option<Coord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl WeatherReading {
    /// The primary condition. Parsing guarantees there is at least one.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// "London, GB", or just the name for places without a country code.
    pub fn location_label(&self) -> String {
        match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}
