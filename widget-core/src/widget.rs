//! Request handler tying input, fetch and view state together.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::{
    error::WeatherError,
    model::{Query, Units, WeatherReading},
    provider::WeatherProvider,
    view::ViewState,
};

const LOCATION_FAILURE: &str = "Failed to fetch weather data for your location.";

/// How a successful lookup updates the input field.
#[derive(Debug, Clone, Copy)]
enum InputUpdate {
    Keep,
    /// Replace with the city that was asked for.
    QueriedCity,
    /// Replace with the location name the API resolved.
    ResolvedName,
}

/// Weather widget controller.
///
/// Every lookup is tagged with a sequence number; a response that settles after a
/// newer lookup has started is dropped, so the view always reflects the latest request.
#[derive(Debug)]
pub struct Widget {
    provider: Arc<dyn WeatherProvider>,
    units: Units,
    view: watch::Sender<ViewState>,
    latest: AtomicU64,
}

impl Widget {
    pub fn new(provider: Arc<dyn WeatherProvider>, units: Units) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            provider,
            units,
            view,
            latest: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Receiver that is notified on every view state transition.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// Handle a submit from the input field (button click or Enter).
    ///
    /// Blank input shows an error immediately and issues no request.
    pub async fn submit(&self, input: &str) {
        self.view.send_modify(|v| v.input = input.to_string());

        match Query::city(input) {
            Ok(query) => self.lookup(query, InputUpdate::Keep).await,
            Err(err) => self.reject(err),
        }
    }

    /// Look up a city and put its name into the input field on success.
    pub async fn show_city(&self, city: &str) {
        match Query::city(city) {
            Ok(query) => self.lookup(query, InputUpdate::QueriedCity).await,
            Err(err) => self.reject(err),
        }
    }

    /// Look up a coordinate pair and put the resolved location name into the input field.
    pub async fn show_coordinates(&self, lat: f64, lon: f64) {
        match Query::coordinates(lat, lon) {
            Ok(query) => self.lookup(query, InputUpdate::ResolvedName).await,
            Err(err) => self.reject(err),
        }
    }

    /// Show an input error without issuing a request.
    ///
    /// A rejected query is still the newest action, so any lookup in flight goes stale.
    fn reject(&self, err: WeatherError) {
        debug!(error = %err, "Rejected query");
        self.view.send_modify(|v| {
            self.latest.fetch_add(1, Ordering::SeqCst);
            v.show_error(err.to_string());
        });
    }

    // `latest` is only bumped and compared while the view is write-locked, so a
    // response can never land between another lookup's bump and its Loading state.
    #[instrument(skip_all, fields(query = %query))]
    async fn lookup(&self, query: Query, update: InputUpdate) {
        let mut seq = 0;
        self.view.send_modify(|v| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            v.show_loading();
        });

        let outcome = self.provider.current(&query).await;

        let units = self.units;
        let applied = self.view.send_if_modified(|v| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            match &outcome {
                Ok(reading) => {
                    v.render(reading, units);
                    match (update, &query) {
                        (InputUpdate::QueriedCity, Query::City(city)) => v.input = city.clone(),
                        (InputUpdate::ResolvedName, _) => v.input = reading.name.clone(),
                        _ => {}
                    }
                }
                Err(err) => match &query {
                    Query::Coordinates { .. } => v.show_error(LOCATION_FAILURE),
                    Query::City(_) => v.show_error(err.to_string()),
                },
            }
            true
        });

        match outcome {
            Err(err) if !applied => debug!(seq, error = %err, "Discarding stale weather error"),
            Ok(_) if !applied => debug!(seq, "Discarding stale weather response"),
            Ok(reading) => log_loaded(&reading),
            Err(err) => error!(error = ?err, "Error fetching weather data"),
        }
    }
}

fn log_loaded(reading: &WeatherReading) {
    let location = reading.location_label();
    match reading.coord {
        Some(coord) => info!(%location, lat = coord.lat, lon = coord.lon, "Weather loaded"),
        None => info!(%location, "Weather loaded"),
    }
}
