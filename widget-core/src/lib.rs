//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather fetch client behind the `WeatherProvider` seam
//! - Error classification for failed lookups
//! - The view state and the renderer that fills it
//! - The `Widget` request handler driving all of the above
//!
//! It is used by `widget-cli`, but any front end that can draw a [`ViewState`] can reuse it.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;
pub mod widget;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use model::{Query, Units, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient, provider_from_config};
pub use view::{DisplayState, ViewState, WeatherView};
pub use widget::Widget;
