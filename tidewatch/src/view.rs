//! HTML fragments for the forecast display region.

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::forecast::ForecastDay;

const FORECAST_TEMPLATE: &str = include_str!("templates/forecast.html");
const UNAVAILABLE_TEMPLATE: &str = include_str!("templates/forecast_unavailable.html");

/// Served if even the notice template cannot render.
pub const UNAVAILABLE_FALLBACK: &str =
    "<div class=\"forecast-error\"><p>Weather forecast unavailable.</p></div>\n";

#[derive(Debug, Serialize)]
struct DayContext {
    date: String,
    day_name: String,
    date_label: String,
    forecast: String,
    icon: &'static str,
    icon_label: &'static str,
    low: String,
    high: String,
}

impl DayContext {
    fn from_day(day: &ForecastDay) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            day_name: day.day_name.clone(),
            date_label: day.date_label.clone(),
            forecast: day.forecast.clone(),
            icon: day.icon.glyph(),
            icon_label: day.icon.label(),
            low: format!("{:.0}", day.temperature_low),
            high: format!("{:.0}", day.temperature_high),
        }
    }
}

/// Template engine wrapper around minijinja. Output is HTML-escaped.
#[derive(Debug)]
pub struct ForecastView {
    env: Environment<'static>,
}

impl ForecastView {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("forecast.html", FORECAST_TEMPLATE)
            .context("parse forecast template")?;
        env.add_template("forecast_unavailable.html", UNAVAILABLE_TEMPLATE)
            .context("parse unavailable template")?;
        Ok(Self { env })
    }

    /// Render every day as a single batch.
    pub fn render_days(&self, region: &str, days: &[ForecastDay]) -> Result<String> {
        let days: Vec<DayContext> = days.iter().map(DayContext::from_day).collect();
        let template = self.env.get_template("forecast.html")?;
        let rendered = template
            .render(context! { region => region, days => days })
            .context("render forecast")?;
        Ok(rendered)
    }

    /// Static "forecast unavailable" notice.
    pub fn render_unavailable(&self, region: &str) -> String {
        self.env
            .get_template("forecast_unavailable.html")
            .and_then(|template| template.render(context! { region => region }))
            .unwrap_or_else(|_| UNAVAILABLE_FALLBACK.to_string())
    }
}
