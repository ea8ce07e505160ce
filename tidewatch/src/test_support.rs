//! Test-only helpers: scripted weather provider, forecast payloads, and a
//! temporary project layout.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::core::types::Location;
use crate::io::config::{TidewatchConfig, write_config};
use crate::io::init::{InitOptions, TidewatchPaths, init_tidewatch};
use crate::io::weather::WeatherProvider;

const CONDITIONS: &[&str] = &[
    "Thundery Showers",
    "Partly Cloudy (Day)",
    "Sunny",
    "Hazy",
    "Windy",
    "Fair and Warm",
];

/// Build a forecast body from `(date, text, [low, high])` entries.
pub fn forecast_body(entries: &[(&str, &str, [f64; 2])]) -> Value {
    let forecasts: Vec<Value> = entries
        .iter()
        .map(|(date, forecast, temperature)| {
            json!({ "date": date, "forecast": forecast, "temperature": temperature })
        })
        .collect();
    json!({
        "items": [
            { "update_timestamp": "2026-10-19T05:00:00+08:00", "forecasts": forecasts }
        ]
    })
}

/// A well-formed forecast body with `days` consecutive entries from 2026-10-19.
pub fn sample_forecast_body(days: usize) -> Value {
    let entries: Vec<(String, &str, [f64; 2])> = (0..days)
        .map(|offset| {
            (
                format!("2026-10-{:02}", 19 + offset),
                CONDITIONS[offset % CONDITIONS.len()],
                [24.0, 31.0 + offset as f64],
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str, [f64; 2])> = entries
        .iter()
        .map(|(date, text, temperature)| (date.as_str(), *text, *temperature))
        .collect();
    forecast_body(&borrowed)
}

/// Weather provider returning canned bodies, optionally failing with a status.
#[derive(Debug)]
pub struct ScriptedWeather {
    current: Value,
    forecast: Value,
    current_status: Option<u16>,
    forecast_status: Option<u16>,
    requested: Mutex<Vec<Location>>,
}

impl ScriptedWeather {
    pub fn ok(forecast: Value) -> Self {
        Self {
            current: json!({ "items": [ { "forecasts": [] } ] }),
            forecast,
            current_status: None,
            forecast_status: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_current(mut self, status: u16) -> Self {
        self.current_status = Some(status);
        self
    }

    pub fn failing_forecast(mut self, status: u16) -> Self {
        self.forecast_status = Some(status);
        self
    }

    /// Locations passed to either endpoint, in call order.
    pub fn requested(&self) -> Vec<Location> {
        self.requested.lock().expect("requested lock").clone()
    }

    fn respond(&self, location: Location, status: Option<u16>, body: &Value) -> Result<Value> {
        self.requested.lock().expect("requested lock").push(location);
        match status {
            Some(status) => Err(anyhow!("scripted failure with status {status}")),
            None => Ok(body.clone()),
        }
    }
}

impl WeatherProvider for ScriptedWeather {
    async fn current(&self, location: Location) -> Result<Value> {
        self.respond(location, self.current_status, &self.current)
    }

    async fn forecast(&self, location: Location) -> Result<Value> {
        self.respond(location, self.forecast_status, &self.forecast)
    }
}

/// Temporary project root with an initialized `.tidewatch/` layout.
pub struct TestProject {
    temp: TempDir,
    pub paths: TidewatchPaths,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir()?;
        let paths = init_tidewatch(temp.path(), &InitOptions { force: false })?;
        Ok(Self { temp, paths })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Point both weather endpoints at `base_url` (`/current`, `/forecast`).
    pub fn use_weather_base(&self, base_url: &str) -> Result<()> {
        let mut cfg = TidewatchConfig::default();
        cfg.weather.current_url = format!("{base_url}/current");
        cfg.weather.forecast_url = format!("{base_url}/forecast");
        write_config(&self.paths.config_path, &cfg)
    }
}
