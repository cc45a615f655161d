use async_trait::async_trait;
use reqwest::Client;

use super::ForecastProvider;
use crate::error::ProviderError;
use crate::model::{ForecastResponse, Units};

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Real network client for the OpenWeatherMap 5-day / 3-hour forecast.
///
/// Always queries metric so stored data stays Celsius; the requested
/// display units are a render-time concern.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn get_forecast(
        &self,
        city: &str,
        _units: Units,
    ) -> Result<ForecastResponse, ProviderError> {
        tracing::debug!(city, "requesting 5-day forecast from OpenWeather");

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(status, city));
        }

        let body = res.text().await?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|err| ProviderError::Unknown {
                status: status.as_u16(),
                message: format!("unexpected forecast payload: {err}"),
            })?;

        Ok(parsed)
    }
}
