use serde::{Deserialize, Serialize};

/// Display unit system for temperatures.
///
/// Stored forecast data is always Celsius; the unit system only affects
/// how temperatures are rendered (see [`crate::units::convert_temperature`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    /// Degree symbol for the unit system.
    pub fn temp_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
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
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            )),
        }
    }
}

/// Forecast response envelope, shaped like the OpenWeatherMap
/// 5-day / 3-hour forecast payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub cod: String,
    pub message: f64,
    pub cnt: u32,
    pub list: Vec<ForecastSample>,
}

impl ForecastResponse {
    /// The most recent sample, used as "current conditions".
    pub fn current(&self) -> Option<&ForecastSample> {
        self.list.first()
    }
}

/// One raw 3-hour forecast measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch timestamp, seconds.
    pub dt: i64,
    pub main: MainMeasurements,
    pub weather: Vec<WeatherCondition>,
    pub clouds: Clouds,
    pub wind: Wind,
    pub dt_txt: String,
}

/// Temperatures are Celsius, pressure hPa, humidity integer percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMeasurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Cloud cover, percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

/// Wind speed in m/s, direction in meteorological degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let s = units.as_str();
            let parsed = Units::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
        assert_eq!(Units::try_from("METRIC").unwrap(), Units::Metric);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
        assert!(err.to_string().contains("metric, imperial"));
    }

    #[test]
    fn envelope_deserializes_forecast_shape() {
        let raw = r#"{
            "cod": "200",
            "message": 0,
            "cnt": 1,
            "list": [{
                "dt": 1704067200,
                "main": {
                    "temp": 8.2,
                    "feels_like": 6.1,
                    "temp_min": 6.4,
                    "temp_max": 9.8,
                    "pressure": 1012,
                    "humidity": 81
                },
                "weather": [{
                    "id": 803,
                    "main": "Clouds",
                    "description": "broken clouds",
                    "icon": "04d"
                }],
                "clouds": { "all": 75 },
                "wind": { "speed": 4.6, "deg": 240 },
                "dt_txt": "2024-01-01 00:00:00"
            }]
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(raw).expect("envelope should parse");
        assert_eq!(parsed.cod, "200");
        assert_eq!(parsed.cnt, 1);
        assert_eq!(parsed.list.len(), 1);

        let sample = parsed.current().expect("one sample");
        assert_eq!(sample.dt, 1704067200);
        assert_eq!(sample.main.humidity, 81);
        assert_eq!(sample.weather[0].description, "broken clouds");
        assert_eq!(sample.wind.deg, 240);
    }

    #[test]
    fn current_is_none_for_empty_list() {
        let response = ForecastResponse {
            cod: "200".to_string(),
            message: 0.0,
            cnt: 0,
            list: Vec::new(),
        };
        assert!(response.current().is_none());
    }
}
