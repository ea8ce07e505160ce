//! Startup wiring shared by the CLI and the UI server.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::types::Location;
use crate::forecast::ForecastPipeline;
use crate::io::config::{TidewatchConfig, load_config};
use crate::io::init::TidewatchPaths;
use crate::io::kv::FileKvStore;
use crate::io::render_target::RenderTarget;
use crate::io::state_store::StateStore;
use crate::io::weather::HttpWeatherProvider;

/// Loaded config plus the state store for a project root.
#[derive(Debug)]
pub struct Session {
    pub paths: TidewatchPaths,
    pub config: TidewatchConfig,
    pub store: StateStore<FileKvStore>,
}

impl Session {
    /// Load config and saved state for `root`.
    ///
    /// A missing `.tidewatch/` directory is fine: defaults are used and state
    /// is created on the first save.
    pub fn open(root: &Path) -> Result<Self> {
        let paths = TidewatchPaths::new(root);
        let config = load_config(&paths.config_path).context("load tidewatch config")?;
        let mut store = StateStore::new(
            FileKvStore::new(&paths.storage_dir),
            config.storage_key.clone(),
        );
        store.load();
        debug!(root = %root.display(), "session opened");
        Ok(Self {
            paths,
            config,
            store,
        })
    }

    /// The user's saved location, else the configured default.
    pub fn location(&self) -> Location {
        self.store
            .state()
            .user_location
            .unwrap_or(self.config.default_location)
    }

    /// Pipeline against the configured HTTP provider.
    pub fn forecast_pipeline<T: RenderTarget>(
        &self,
        target: T,
    ) -> Result<ForecastPipeline<HttpWeatherProvider, T>> {
        ForecastPipeline::new(HttpWeatherProvider::new(&self.config.weather), target)
    }
}
