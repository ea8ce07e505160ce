//! Widget configuration stored under `.tidewatch/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::Location;

/// Widget configuration (TOML).
///
/// Missing fields default to values that work against the public provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TidewatchConfig {
    /// Key the application state is persisted under.
    pub storage_key: String,

    /// Identifier of the display region the forecast is rendered into.
    pub forecast_region: String,

    pub weather: WeatherConfig,

    /// Location used when the user has not shared one.
    pub default_location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WeatherConfig {
    /// Near-term conditions endpoint. Fetched only to confirm the provider is up.
    pub current_url: String,
    /// Multi-day forecast endpoint.
    pub forecast_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            current_url: "https://api.data.gov.sg/v1/environment/2-hour-weather-forecast"
                .to_string(),
            forecast_url: "https://api.data.gov.sg/v1/environment/4-day-weather-forecast"
                .to_string(),
        }
    }
}

impl Default for TidewatchConfig {
    fn default() -> Self {
        Self {
            storage_key: "beachCleanupState".to_string(),
            forecast_region: "forecast".to_string(),
            weather: WeatherConfig::default(),
            default_location: Location {
                lat: 33.985,
                lng: -118.4695,
            },
        }
    }
}

impl TidewatchConfig {
    pub fn validate(&self) -> Result<()> {
        validate_identifier("storage_key", &self.storage_key)?;
        validate_identifier("forecast_region", &self.forecast_region)?;
        validate_url("weather.current_url", &self.weather.current_url)?;
        validate_url("weather.forecast_url", &self.weather.forecast_url)?;
        let Location { lat, lng } = self.default_location;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(anyhow!("default_location.lat must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(anyhow!("default_location.lng must be within [-180, 180]"));
        }
        Ok(())
    }
}

/// Keys and region ids double as file names, so they must be plain names.
pub(crate) fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} must be non-empty"));
    }
    if value.contains(['/', '\\']) || value.starts_with('.') {
        return Err(anyhow!("{field} must be a plain name, got {value:?}"));
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(anyhow!("{field} must be an http(s) URL, got {value:?}"))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TidewatchConfig::default()`.
pub fn load_config(path: &Path) -> Result<TidewatchConfig> {
    if !path.exists() {
        let cfg = TidewatchConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TidewatchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TidewatchConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
