use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::Units;
use crate::provider::ProviderKind;
use crate::throttle;

/// Tool configuration stored on disk. Weather data itself is never
/// persisted; this only covers defaults and provider credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City shown before the user picks one.
    pub city: String,

    /// Display unit system, "metric" or "imperial".
    pub units: Units,

    /// Provider short name, e.g. "mock" or "openweather".
    pub provider: String,

    /// API key for providers that need one.
    pub api_key: Option<String>,

    /// Minimum spacing between provider calls, milliseconds.
    pub throttle_ms: Option<u64>,

    /// Drop fetch resolutions that were superseded by a newer request.
    pub discard_stale_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: "London".to_string(),
            units: Units::Metric,
            provider: ProviderKind::Mock.as_str().to_string(),
            api_key: None,
            throttle_ms: None,
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Return the configured provider as a strongly-typed ProviderKind.
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        ProviderKind::try_from(self.provider.as_str())
    }

    pub fn throttle_delay(&self) -> Duration {
        Duration::from_millis(self.throttle_ms.unwrap_or(throttle::DEFAULT_DELAY_MS))
    }

    pub fn set_provider(&mut self, kind: ProviderKind) {
        self.provider = kind.as_str().to_string();
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_session_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.city, "London");
        assert_eq!(cfg.units, Units::Metric);
        assert_eq!(cfg.provider_kind().unwrap(), ProviderKind::Mock);
        assert_eq!(cfg.throttle_delay(), Duration::from_millis(5000));
        assert!(!cfg.discard_stale_responses);
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.city = "Tokyo".to_string();
        cfg.units = Units::Imperial;
        cfg.set_provider(ProviderKind::OpenWeather);
        cfg.api_key = Some("KEY".to_string());
        cfg.throttle_ms = Some(250);

        let encoded = toml::to_string_pretty(&cfg).expect("config should serialize");
        let decoded: Config = toml::from_str(&encoded).expect("config should parse");

        assert_eq!(decoded.city, "Tokyo");
        assert_eq!(decoded.units, Units::Imperial);
        assert_eq!(decoded.provider_kind().unwrap(), ProviderKind::OpenWeather);
        assert_eq!(decoded.api_key.as_deref(), Some("KEY"));
        assert_eq!(decoded.throttle_delay(), Duration::from_millis(250));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let decoded: Config = toml::from_str("city = \"Cairo\"\n").expect("config should parse");

        assert_eq!(decoded.city, "Cairo");
        assert_eq!(decoded.units, Units::Metric);
        assert_eq!(decoded.provider_kind().unwrap(), ProviderKind::Mock);
        assert!(decoded.api_key.is_none());
    }

    #[test]
    fn unknown_provider_surfaces_a_parse_error() {
        let cfg = Config {
            provider: "doesnotexist".to_string(),
            ..Config::default()
        };

        let err = cfg.provider_kind().unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }
}
