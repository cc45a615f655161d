//! Canned-fixture forecast provider.
//!
//! Serves the five named demo cities from embedded JSON fixtures. Each
//! call reshapes a city's base sample into a full 5-day / 3-hour feed
//! with randomized jitter, so repeat calls with identical inputs return
//! different values. A configurable latency simulates the network.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use super::ForecastProvider;
use crate::error::ProviderError;
use crate::model::{ForecastResponse, ForecastSample, Units};

/// Cities the mock can serve; anything else fails with `NotFound`.
pub const KNOWN_CITIES: &[&str] = &["London", "New York", "Tokyo", "Sydney", "Cairo"];

const SAMPLES_PER_FORECAST: usize = 40;
const SAMPLE_SPACING_SECS: i64 = 3 * 60 * 60;
const DEFAULT_LATENCY_MS: u64 = 1000;

const HUMIDITY_FLOOR: f64 = 20.0;
const HUMIDITY_CEIL: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct MockProvider {
    latency: Duration,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for MockProvider {
    async fn get_forecast(
        &self,
        city: &str,
        _units: Units,
    ) -> Result<ForecastResponse, ProviderError> {
        sleep(self.latency).await;

        let raw = fixture_for(city).ok_or_else(|| ProviderError::NotFound(city.to_string()))?;
        let base: ForecastResponse =
            serde_json::from_str(raw).map_err(|err| ProviderError::Unknown {
                status: 500,
                message: format!("malformed fixture for {city}: {err}"),
            })?;
        let Some(first) = base.list.first() else {
            return Err(ProviderError::Unknown {
                status: 500,
                message: format!("fixture for {city} has no samples"),
            });
        };

        let mut rng = rand::thread_rng();
        let mut list = Vec::with_capacity(SAMPLES_PER_FORECAST);
        for step in 0..SAMPLES_PER_FORECAST {
            list.push(jittered_sample(first, step as i64, &mut rng));
        }

        tracing::debug!(city, samples = list.len(), "serving canned forecast");

        Ok(ForecastResponse {
            cod: base.cod,
            message: base.message,
            cnt: list.len() as u32,
            list,
        })
    }
}

fn jittered_sample(base: &ForecastSample, step: i64, rng: &mut impl Rng) -> ForecastSample {
    let mut sample = base.clone();

    sample.dt = base.dt + step * SAMPLE_SPACING_SECS;
    sample.main.temp = base.main.temp + rng.gen_range(-5.0..5.0);
    sample.main.temp_min = base.main.temp_min + rng.gen_range(-4.0..4.0);
    sample.main.temp_max = base.main.temp_max + rng.gen_range(-4.0..4.0);
    sample.main.humidity = jittered_humidity(base.main.humidity, rng);
    sample.dt_txt = format_dt_txt(sample.dt);

    sample
}

fn jittered_humidity(base: u8, rng: &mut impl Rng) -> u8 {
    let jittered = f64::from(base) + rng.gen_range(-10.0..10.0);
    jittered.clamp(HUMIDITY_FLOOR, HUMIDITY_CEIL).round() as u8
}

fn format_dt_txt(dt: i64) -> String {
    DateTime::<Utc>::from_timestamp(dt, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn fixture_for(city: &str) -> Option<&'static str> {
    match city {
        "London" => Some(include_str!("../../fixtures/london.json")),
        "New York" => Some(include_str!("../../fixtures/newyork.json")),
        "Tokyo" => Some(include_str!("../../fixtures/tokyo.json")),
        "Sydney" => Some(include_str!("../../fixtures/sydney.json")),
        "Cairo" => Some(include_str!("../../fixtures/cairo.json")),
        _ => None,
    }
}
