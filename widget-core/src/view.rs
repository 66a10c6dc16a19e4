//! View state: what a front end should draw at any instant.

use serde::Serialize;

use crate::model::{Units, WeatherReading};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Display fields written by [`ViewState::render`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
    pub icon_alt: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    /// Observation time, e.g. "14:05 UTC".
    pub updated: Option<String>,
}

impl WeatherView {
    pub fn from_reading(reading: &WeatherReading, units: Units) -> Self {
        let temp_suffix = units.temperature_suffix();
        let (description, icon) = reading
            .condition()
            .map(|c| (c.description.clone(), c.icon.clone()))
            .unwrap_or_default();

        Self {
            location: reading.location_label(),
            temperature: format!("{}{temp_suffix}", round_half_up(reading.main.temp)),
            icon_url: format!("{ICON_BASE_URL}/{icon}@2x.png"),
            icon_alt: description.clone(),
            description,
            feels_like: format!("{}{temp_suffix}", round_half_up(reading.main.feels_like)),
            humidity: format!("{}%", reading.main.humidity),
            wind_speed: format!("{} {}", reading.wind.speed, units.wind_suffix()),
            updated: reading.observed_at().map(|t| t.format("%H:%M UTC").to_string()),
        }
    }
}

/// The mutually exclusive UI modes. Result and error can never be shown together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Result(WeatherView),
    Error(String),
}

/// Everything the widget shows: the input field and the current display state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub input: String,
    pub display: DisplayState,
}

impl ViewState {
    /// Show the loading indicator, hiding result and error.
    pub fn show_loading(&mut self) {
        self.display = DisplayState::Loading;
    }

    /// Write a reading into the result fields and show them, hiding error and loading.
    pub fn render(&mut self, reading: &WeatherReading, units: Units) {
        self.display = DisplayState::Result(WeatherView::from_reading(reading, units));
    }

    /// Show an error message, hiding result and loading.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.display = DisplayState::Error(message.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.display, DisplayState::Loading)
    }

    pub fn result(&self) -> Option<&WeatherView> {
        match &self.display {
            DisplayState::Result(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.display {
            DisplayState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Round to the nearest whole number, halves towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    // f64::round is exact but sends negative halves away from zero
    let rounded = value.round();
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}
