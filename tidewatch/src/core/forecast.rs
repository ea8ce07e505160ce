//! Parsing of the multi-day forecast response into display-ready days.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::core::icons::{WeatherIcon, icon_for};

/// Maximum number of days rendered, regardless of how many are returned.
pub const MAX_FORECAST_DAYS: usize = 4;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    items: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    forecasts: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    date: String,
    forecast: String,
    temperature: [f64; 2],
}

/// One day of the rendered outlook.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Short weekday label, e.g. `Mon`.
    pub day_name: String,
    /// Short month/day label, e.g. `Oct 20`.
    pub date_label: String,
    pub forecast: String,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub icon: WeatherIcon,
}

/// Parse `items[0].forecasts` and derive up to [`MAX_FORECAST_DAYS`] days.
///
/// Missing or empty `items`, missing entry fields, a temperature range that is
/// not exactly `[low, high]`, or an unparsable date are all errors.
pub fn parse_forecast(body: &Value) -> Result<Vec<ForecastDay>> {
    let response =
        ForecastResponse::deserialize(body).context("forecast response has unexpected shape")?;
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("forecast response has no items"))?;
    item.forecasts
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(forecast_day)
        .collect()
}

fn forecast_day(entry: ForecastEntry) -> Result<ForecastDay> {
    let date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
        .with_context(|| format!("invalid forecast date {:?}", entry.date))?;
    let [temperature_low, temperature_high] = entry.temperature;
    Ok(ForecastDay {
        date,
        day_name: date.format("%a").to_string(),
        date_label: date.format("%b %-d").to_string(),
        icon: icon_for(&entry.forecast),
        forecast: entry.forecast,
        temperature_low,
        temperature_high,
    })
}
