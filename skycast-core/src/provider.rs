use crate::{
    Config,
    error::ProviderError,
    model::{ForecastResponse, Units},
    throttle::RateLimiter,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod mock;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Mock,
    OpenWeather,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderKind] {
        &[ProviderKind::Mock, ProviderKind::OpenWeather]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "openweather" => Ok(ProviderKind::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mock, openweather."
            )),
        }
    }
}

/// A source of 5-day forecasts for a named city.
///
/// Implementations always return Celsius data regardless of the requested
/// display units; conversion happens at render time. Repeat calls with
/// identical inputs need not return identical payloads.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn get_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<ForecastResponse, ProviderError>;
}

/// Decorator that spaces out calls to the wrapped provider.
///
/// Early calls are suspended on the limiter, never rejected, so every
/// request eventually reaches the provider in issue order.
#[derive(Debug)]
pub struct Throttled<P> {
    inner: P,
    limiter: RateLimiter,
}

impl<P> Throttled<P> {
    pub fn new(inner: P, delay: Duration) -> Self {
        Self {
            inner,
            limiter: RateLimiter::new(delay),
        }
    }
}

#[async_trait]
impl<P: ForecastProvider> ForecastProvider for Throttled<P> {
    async fn get_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<ForecastResponse, ProviderError> {
        self.limiter.acquire().await;
        self.inner.get_forecast(city, units).await
    }
}

/// Construct the configured provider, wrapped in a throttle.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let kind = config.provider_kind()?;
    let delay = config.throttle_delay();

    let boxed: Box<dyn ForecastProvider> = match kind {
        ProviderKind::Mock => Box::new(Throttled::new(mock::MockProvider::new(), delay)),
        ProviderKind::OpenWeather => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{kind}'.\n\
                     Hint: run `skycast configure {kind}` and enter your API key."
                )
            })?;
            Box::new(Throttled::new(
                openweather::OpenWeatherProvider::new(api_key),
                delay,
            ))
        }
    };

    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tokio::time::Instant;

    #[test]
    fn provider_kind_as_str_roundtrip() {
        for kind in ProviderKind::all() {
            let s = kind.as_str();
            let parsed = ProviderKind::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderKind::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_config_defaults_to_mock() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn openweather_without_api_key_is_an_error() {
        let cfg = Config {
            provider: ProviderKind::OpenWeather.as_str().to_string(),
            ..Config::default()
        };

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skycast configure"));
    }

    /// Records when each underlying call was issued.
    #[derive(Debug, Default)]
    struct ProbeProvider {
        issued_at: Mutex<Vec<Instant>>,
    }

    #[async_trait]
    impl ForecastProvider for ProbeProvider {
        async fn get_forecast(
            &self,
            _city: &str,
            _units: Units,
        ) -> Result<ForecastResponse, ProviderError> {
            self.issued_at.lock().push(Instant::now());
            Ok(ForecastResponse {
                cod: "200".to_string(),
                message: 0.0,
                cnt: 0,
                list: Vec::new(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced_by_the_delay() {
        let throttled = Throttled::new(ProbeProvider::default(), Duration::from_millis(5000));

        throttled
            .get_forecast("London", Units::Metric)
            .await
            .expect("probe always succeeds");
        throttled
            .get_forecast("London", Units::Metric)
            .await
            .expect("probe always succeeds");

        let issued_at = throttled.inner.issued_at.lock();
        assert_eq!(issued_at.len(), 2);
        assert!(issued_at[1] - issued_at[0] >= Duration::from_millis(5000));
    }
}
