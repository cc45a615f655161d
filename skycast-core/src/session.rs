//! Fetch session state machine.
//!
//! One [`RequestState`] exists per session. It is only ever mutated by
//! the private transition function, driven by the [`WeatherSession`]
//! methods, so `loading`/`error`/`data` can never disagree.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{ForecastResponse, Units};
use crate::provider::ForecastProvider;

/// Read-only view of the session: selected city and units, the last
/// successful payload, and the in-flight/error flags.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub city: String,
    pub units: Units,
    pub data: Option<ForecastResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            city: "London".to_string(),
            units: Units::Metric,
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug)]
enum Action {
    FetchStarted,
    FetchSucceeded(ForecastResponse),
    FetchFailed(String),
    CityChanged(String),
    UnitsChanged(Units),
    ErrorSet(String),
    ErrorCleared,
}

impl RequestState {
    /// The single transition point; no field is mutated anywhere else.
    ///
    /// A failed fetch keeps the previous payload so the dashboard can
    /// keep rendering the last good data next to the error.
    fn apply(&mut self, action: Action) {
        match action {
            Action::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::FetchSucceeded(payload) => {
                self.loading = false;
                self.data = Some(payload);
                self.error = None;
            }
            Action::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            Action::CityChanged(name) => self.city = name,
            Action::UnitsChanged(units) => self.units = units,
            Action::ErrorSet(message) => self.error = Some(message),
            Action::ErrorCleared => self.error = None,
        }
    }
}

/// Owns the provider and the session state, exposing the fetch flow and
/// the independent field transitions.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn ForecastProvider>,
    state: Mutex<RequestState>,
    issued: AtomicU64,
    discard_stale: bool,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(RequestState::default()),
            issued: AtomicU64::new(0),
            discard_stale: false,
        }
    }

    /// Opt into dropping resolutions of superseded requests.
    ///
    /// Off by default: when two overlapping `request_forecast` calls
    /// race, the last resolution to arrive wins even if it belongs to
    /// the older request. Enabling this tags every request with a
    /// sequence number and ignores any resolution that is no longer the
    /// latest issued.
    pub fn discard_stale_responses(mut self, enabled: bool) -> Self {
        self.discard_stale = enabled;
        self
    }

    /// Fetch a forecast for `city`, recording the requested city and
    /// units before the provider resolves.
    ///
    /// Failures land in the state's `error` field; there are no retries
    /// and no cancellation of in-flight calls.
    pub async fn request_forecast(&self, city: &str, units: Units) {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock();
            state.apply(Action::FetchStarted);
            state.apply(Action::CityChanged(city.to_string()));
            state.apply(Action::UnitsChanged(units));
        }

        tracing::debug!(city, %units, seq, "fetching forecast");
        let result = self.provider.get_forecast(city, units).await;

        let mut state = self.state.lock();
        if self.discard_stale && seq != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(seq, "discarding stale forecast resolution");
            return;
        }

        match result {
            Ok(payload) => state.apply(Action::FetchSucceeded(payload)),
            Err(err) => {
                tracing::warn!(city, error = %err, "forecast fetch failed");
                state.apply(Action::FetchFailed(err.to_string()));
            }
        }
    }

    /// Select a city without fetching; callers decide when to refresh.
    pub fn change_city(&self, name: &str) {
        self.state.lock().apply(Action::CityChanged(name.to_string()));
    }

    /// Select display units without fetching or touching stored data.
    pub fn toggle_units(&self, units: Units) {
        self.state.lock().apply(Action::UnitsChanged(units));
    }

    /// Surface an error unrelated to the fetch flow (input validation).
    pub fn set_error(&self, message: impl Into<String>) {
        self.state.lock().apply(Action::ErrorSet(message.into()));
    }

    pub fn clear_error(&self) {
        self.state.lock().apply(Action::ErrorCleared);
    }

    pub fn snapshot(&self) -> RequestState {
        self.state.lock().clone()
    }
}
