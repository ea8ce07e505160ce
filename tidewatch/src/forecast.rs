//! Forecast retrieval and rendering for a location.
//!
//! Coordinates the weather provider, the pure parser in
//! [`core::forecast`](crate::core::forecast), the HTML view, and a render
//! target. Any failure ends in the "forecast unavailable" notice; nothing is
//! returned as an error.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::core::forecast::parse_forecast;
use crate::core::types::Location;
use crate::io::render_target::RenderTarget;
use crate::io::weather::WeatherProvider;
use crate::view::ForecastView;

/// What a pipeline run left in the display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ForecastOutcome {
    /// The outlook was rendered with `days` entries.
    Rendered { days: usize },
    /// The error notice was rendered.
    Unavailable,
}

/// Fetch, parse and render a multi-day outlook into one display region.
#[derive(Debug)]
pub struct ForecastPipeline<P, T> {
    provider: P,
    target: T,
    view: ForecastView,
}

impl<P: WeatherProvider, T: RenderTarget> ForecastPipeline<P, T> {
    pub fn new(provider: P, target: T) -> Result<Self> {
        Ok(Self {
            provider,
            target,
            view: ForecastView::new()?,
        })
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Run one attempt for `location`. No retries; each call starts fresh.
    #[instrument(
        skip_all,
        fields(region = self.target.region_id(), lat = location.lat, lng = location.lng)
    )]
    pub async fn run(&mut self, location: Location) -> ForecastOutcome {
        let region = self.target.region_id().to_string();
        let (markup, outcome) = match self.fetch_and_render(&region, location).await {
            Ok((markup, days)) => {
                info!(days, "forecast rendered");
                (markup, ForecastOutcome::Rendered { days })
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "forecast unavailable");
                (
                    self.view.render_unavailable(&region),
                    ForecastOutcome::Unavailable,
                )
            }
        };
        if let Err(err) = self.target.replace(&markup) {
            warn!(error = %format!("{err:#}"), "failed to update forecast region");
        }
        outcome
    }

    async fn fetch_and_render(
        &self,
        region: &str,
        location: Location,
    ) -> Result<(String, usize)> {
        // Both requests must succeed; the current-conditions body is not rendered.
        let (_current, forecast) = tokio::try_join!(
            self.provider.current(location),
            self.provider.forecast(location)
        )?;
        let days = parse_forecast(&forecast)?;
        debug!(days = days.len(), "forecast parsed");
        let markup = self.view.render_days(region, &days)?;
        Ok((markup, days.len()))
    }
}
