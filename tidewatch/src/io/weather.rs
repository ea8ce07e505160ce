//! Weather provider abstraction.
//!
//! The [`WeatherProvider`] trait decouples the forecast pipeline from the HTTP
//! backend. Tests use scripted providers that return predetermined bodies.

use std::future::Future;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::WeatherConfig;
use crate::core::types::Location;

/// Source of raw weather JSON for a location.
pub trait WeatherProvider {
    /// Near-term conditions. Errors on transport failure or non-2xx status.
    fn current(&self, location: Location) -> impl Future<Output = Result<Value>> + Send;
    /// Multi-day forecast. Errors on transport failure or non-2xx status.
    fn forecast(&self, location: Location) -> impl Future<Output = Result<Value>> + Send;
}

/// Provider that issues unauthenticated GET requests with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpWeatherProvider {
    client: Client,
    current_url: String,
    forecast_url: String,
}

impl HttpWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            current_url: config.current_url.clone(),
            forecast_url: config.forecast_url.clone(),
        }
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        url: &str,
        location: Location,
    ) -> Result<Value> {
        debug!(
            endpoint,
            url,
            lat = location.lat,
            lng = location.lng,
            "requesting weather"
        );
        let response = self
            .client
            .get(url)
            .query(&[("latitude", location.lat), ("longitude", location.lng)])
            .send()
            .await
            .with_context(|| format!("request {endpoint} weather from {url}"))?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "weather provider returned failure");
            return Err(anyhow!("{endpoint} weather request failed with status {status}"));
        }
        response
            .json::<Value>()
            .await
            .with_context(|| format!("decode {endpoint} weather body"))
    }
}

impl WeatherProvider for HttpWeatherProvider {
    async fn current(&self, location: Location) -> Result<Value> {
        self.get_json("current", &self.current_url, location).await
    }

    async fn forecast(&self, location: Location) -> Result<Value> {
        self.get_json("forecast", &self.forecast_url, location).await
    }
}
