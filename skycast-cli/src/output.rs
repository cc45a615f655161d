//! Text rendering of a session snapshot.
//!
//! Pure functions over [`RequestState`]; unit conversion is applied here
//! and nowhere else, so the stored Celsius data is never mutated.

use chrono::{DateTime, Local, Utc};
use skycast_core::{
    DailyAggregate, RequestState, Units, aggregate_by_day, convert_temperature,
    model::{ForecastSample, WeatherCondition},
    temperature_stats,
};

const FORECAST_DAYS: usize = 5;

pub fn render_dashboard(state: &RequestState) -> String {
    let mut out = String::new();

    out.push_str(&format!("── {} · {} ──\n", state.city, state.units));

    if state.loading {
        out.push_str("loading…\n");
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("error: {error}\n"));
    }

    match &state.data {
        Some(data) => {
            if let Some(current) = data.current() {
                out.push_str(&render_current(current, state.units));
            }
            let days = aggregate_by_day(&data.list);
            out.push_str(&render_forecast(&days, state.units));
            if let Some(stats) = temperature_stats(&days) {
                out.push_str(&format!(
                    "Stats: min {} · avg {} · max {}\n",
                    fmt_temp(stats.min, state.units),
                    fmt_temp(stats.avg, state.units),
                    fmt_temp(stats.max, state.units),
                ));
            }
        }
        None => out.push_str("No forecast data yet.\n"),
    }

    out
}

fn render_current(current: &ForecastSample, units: Units) -> String {
    let description = condition_of(&current.weather);
    let mut out = String::new();

    out.push_str(&format!(
        "Now: {} ({description}), feels like {}\n",
        fmt_temp(current.main.temp, units),
        fmt_temp(current.main.feels_like, units),
    ));
    out.push_str(&format!(
        "     humidity {}% · wind {:.1} m/s · pressure {} hPa · min/max {}/{}\n",
        current.main.humidity,
        current.wind.speed,
        current.main.pressure,
        fmt_degrees(current.main.temp_min, units),
        fmt_degrees(current.main.temp_max, units),
    ));

    out
}

fn render_forecast(days: &[DailyAggregate], units: Units) -> String {
    let mut out = String::from("5-day forecast:\n");

    for (index, day) in days.iter().take(FORECAST_DAYS).enumerate() {
        let label = if index == 0 {
            "Today".to_string()
        } else {
            day_label(day.dt)
        };
        out.push_str(&format!(
            "  {label:<10} {:<18} {}/{} · humidity {}%\n",
            condition_of(&day.weather),
            fmt_degrees(day.temp_min, units),
            fmt_degrees(day.temp_max, units),
            day.humidity,
        ));
    }

    out
}

fn condition_of(weather: &[WeatherCondition]) -> &str {
    weather.first().map(|w| w.description.as_str()).unwrap_or("unknown")
}

fn fmt_temp(celsius: f64, units: Units) -> String {
    format!("{:.1}{}", convert_temperature(celsius, units), units.temp_symbol())
}

fn fmt_degrees(celsius: f64, units: Units) -> String {
    format!("{:.0}°", convert_temperature(celsius, units))
}

fn day_label(dt: i64) -> String {
    DateTime::<Utc>::from_timestamp(dt, 0)
        .map(|t| t.with_timezone(&Local).format("%a %b %e").to_string())
        .unwrap_or_default()
}
