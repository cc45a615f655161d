//! Daily aggregation of raw 3-hour forecast samples, plus summary
//! statistics over the resulting days.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;

use crate::model::{ForecastSample, WeatherCondition, Wind};

/// One calendar day reduced from the samples that fall on it.
///
/// `weather` and `wind` are taken from the day's first sample and act as
/// the representative condition for the day; they are not aggregated.
#[derive(Debug, Clone)]
pub struct DailyAggregate {
    /// First sample's timestamp in the bucket, epoch seconds.
    pub dt: i64,
    /// Mean of the bucket's instantaneous temperatures, Celsius.
    pub temp: f64,
    /// Mean humidity, rounded to the nearest integer percent.
    pub humidity: u8,
    /// Minimum of the bucket's `temp_min` values.
    pub temp_min: f64,
    /// Maximum of the bucket's `temp_max` values.
    pub temp_max: f64,
    pub weather: Vec<WeatherCondition>,
    pub wind: Wind,
}

/// Min/avg/max over a sequence of daily mean temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Group samples into local-calendar-day buckets and reduce each bucket.
///
/// Buckets are emitted in first-occurrence order of their date, not sorted.
/// Every sample lands in exactly one bucket; an empty input yields an
/// empty output.
pub fn aggregate_by_day(samples: &[ForecastSample]) -> Vec<DailyAggregate> {
    aggregate_by_day_in(samples, &Local)
}

/// Timezone-generic variant of [`aggregate_by_day`].
pub fn aggregate_by_day_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyAggregate> {
    let mut buckets: IndexMap<NaiveDate, Vec<&ForecastSample>> = IndexMap::new();

    for sample in samples {
        buckets
            .entry(calendar_date(sample.dt, tz))
            .or_default()
            .push(sample);
    }

    buckets.into_values().map(reduce_bucket).collect()
}

/// Statistics over the aggregates' mean temperatures.
///
/// Returns `None` for an empty input; callers render "no data" instead of
/// propagating a NaN sentinel.
pub fn temperature_stats(days: &[DailyAggregate]) -> Option<TemperatureStats> {
    if days.is_empty() {
        return None;
    }

    let min = days.iter().map(|d| d.temp).fold(f64::INFINITY, f64::min);
    let max = days.iter().map(|d| d.temp).fold(f64::NEG_INFINITY, f64::max);
    let avg = days.iter().map(|d| d.temp).sum::<f64>() / days.len() as f64;

    Some(TemperatureStats { min, max, avg })
}

fn calendar_date<Tz: TimeZone>(dt: i64, tz: &Tz) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(dt, 0)
        .unwrap_or_default()
        .with_timezone(tz)
        .date_naive()
}

fn reduce_bucket(bucket: Vec<&ForecastSample>) -> DailyAggregate {
    // Buckets are only created when a sample is pushed, so never empty.
    let first = bucket[0];
    let count = bucket.len() as f64;

    let temp = bucket.iter().map(|s| s.main.temp).sum::<f64>() / count;
    let humidity =
        (bucket.iter().map(|s| f64::from(s.main.humidity)).sum::<f64>() / count).round() as u8;
    let temp_min = bucket
        .iter()
        .map(|s| s.main.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = bucket
        .iter()
        .map(|s| s.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    DailyAggregate {
        dt: first.dt,
        temp,
        humidity,
        temp_min,
        temp_max,
        weather: first.weather.clone(),
        wind: first.wind.clone(),
    }
}
