//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - The 5-day / 3-hour forecast data model and display-unit conversion
//! - Daily aggregation and temperature statistics over raw samples
//! - Abstraction over forecast providers (canned fixtures or OpenWeatherMap),
//!   plus a throttled wrapper that spaces out provider calls
//! - The fetch session state machine consumed by presentation code
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod throttle;
pub mod units;

pub use aggregate::{DailyAggregate, TemperatureStats, aggregate_by_day, temperature_stats};
pub use config::Config;
pub use error::ProviderError;
pub use model::{ForecastResponse, ForecastSample, Units};
pub use provider::{ForecastProvider, ProviderKind, Throttled, provider_from_config};
pub use session::{RequestState, WeatherSession};
pub use throttle::RateLimiter;
pub use units::convert_temperature;
