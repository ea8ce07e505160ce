//! Shared application state for the UI server.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use tidewatch::core::catalog::cleanup_catalog;
use tidewatch::core::types::{Cleanup, Location};
use tidewatch::forecast::{ForecastOutcome, ForecastPipeline};
use tidewatch::io::config::TidewatchConfig;
use tidewatch::io::kv::FileKvStore;
use tidewatch::io::render_target::{RenderTarget, SharedRegion};
use tidewatch::io::state_store::StateStore;
use tidewatch::io::weather::HttpWeatherProvider;
use tidewatch::session::Session;
use tracing::debug;

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Single writer for the persisted application state.
    pub store: Arc<Mutex<StateStore<FileKvStore>>>,
    /// Forecast display region, read by `GET /api/forecast`.
    pub forecast: SharedRegion,
    pub catalog: Arc<Vec<Cleanup>>,
    pub config: Arc<TidewatchConfig>,
    provider: HttpWeatherProvider,
    runs: Arc<ForecastRuns>,
}

/// Generation bookkeeping for overlapping forecast runs.
///
/// Runs may finish out of order; only a run newer than the last committed one
/// may replace the region.
#[derive(Debug, Default)]
struct ForecastRuns {
    issued: AtomicU64,
    committed: Mutex<u64>,
}

impl AppState {
    /// Load config and saved state for `project_dir`.
    pub fn open(project_dir: &Path) -> Result<Self> {
        let Session { config, store, .. } = Session::open(project_dir)?;
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            forecast: SharedRegion::new(config.forecast_region.clone()),
            catalog: Arc::new(cleanup_catalog()),
            provider: HttpWeatherProvider::new(&config.weather),
            runs: Arc::default(),
            config: Arc::new(config),
        })
    }

    pub fn lock_store(&self) -> Result<MutexGuard<'_, StateStore<FileKvStore>>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("state store lock poisoned"))
    }

    /// The user's saved location, else the configured default.
    pub fn location(&self) -> Result<Location> {
        let store = self.lock_store()?;
        Ok(store
            .state()
            .user_location
            .unwrap_or(self.config.default_location))
    }

    /// Render a fresh forecast for `location` into the shared region.
    ///
    /// The run renders into a scratch region and is committed only if no newer
    /// run has committed in the meantime.
    pub async fn refresh_forecast(&self, location: Location) -> Result<ForecastOutcome> {
        let generation = self.begin_forecast_run();
        let scratch = SharedRegion::new(self.config.forecast_region.clone());
        let mut pipeline = ForecastPipeline::new(self.provider.clone(), scratch.clone())?;
        let outcome = pipeline.run(location).await;
        self.commit_forecast(generation, &scratch.snapshot()?)?;
        Ok(outcome)
    }

    fn begin_forecast_run(&self) -> u64 {
        self.runs.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publish `markup` for run `generation`. Returns `false` for a stale run.
    fn commit_forecast(&self, generation: u64, markup: &str) -> Result<bool> {
        let mut committed = self
            .runs
            .committed
            .lock()
            .map_err(|_| anyhow!("forecast run lock poisoned"))?;
        if generation <= *committed {
            debug!(generation, committed = *committed, "dropping stale forecast run");
            return Ok(false);
        }
        self.forecast.clone().replace(markup)?;
        *committed = generation;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewatch::test_support::TestProject;

    #[test]
    fn stale_forecast_run_does_not_overwrite_newer_one() {
        let project = TestProject::new().expect("project");
        let state = AppState::open(project.path()).expect("open");

        let startup = state.begin_forecast_run();
        let refresh = state.begin_forecast_run();
        assert!(refresh > startup);

        assert!(state.commit_forecast(refresh, "<p>refresh</p>").expect("commit"));
        assert!(!state.commit_forecast(startup, "<p>startup</p>").expect("commit"));
        assert_eq!(state.forecast.snapshot().expect("snapshot"), "<p>refresh</p>");
    }

    #[test]
    fn runs_committing_in_order_each_replace_the_region() {
        let project = TestProject::new().expect("project");
        let state = AppState::open(project.path()).expect("open");

        let first = state.begin_forecast_run();
        assert!(state.commit_forecast(first, "<p>one</p>").expect("commit"));
        let second = state.begin_forecast_run();
        assert!(state.commit_forecast(second, "<p>two</p>").expect("commit"));
        assert_eq!(state.forecast.snapshot().expect("snapshot"), "<p>two</p>");
    }

    #[tokio::test]
    async fn repeated_refreshes_reuse_one_provider_and_publish() {
        let project = TestProject::new().expect("project");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        project
            .use_weather_base(&format!("http://{addr}"))
            .expect("config");
        let state = AppState::open(project.path()).expect("open");
        let location = Location {
            lat: 34.0,
            lng: -118.5,
        };

        for _ in 0..2 {
            let outcome = state.refresh_forecast(location).await.expect("refresh");
            assert_eq!(outcome, ForecastOutcome::Unavailable);
        }
        assert!(
            state
                .forecast
                .snapshot()
                .expect("snapshot")
                .contains("forecast-error")
        );
        assert_eq!(*state.runs.committed.lock().expect("lock"), 2);
    }
}
