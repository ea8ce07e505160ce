//! Display regions the forecast is rendered into.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

/// A named region whose whole content is replaced on each render.
pub trait RenderTarget {
    fn region_id(&self) -> &str;
    fn replace(&mut self, markup: &str) -> Result<()>;
}

/// Region persisted as `<dir>/<region>.html`.
#[derive(Debug, Clone)]
pub struct FileRegion {
    region: String,
    path: PathBuf,
}

impl FileRegion {
    pub fn new(dir: &Path, region: impl Into<String>) -> Self {
        let region = region.into();
        let path = dir.join(format!("{region}.html"));
        Self { region, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderTarget for FileRegion {
    fn region_id(&self) -> &str {
        &self.region
    }

    fn replace(&mut self, markup: &str) -> Result<()> {
        super::write_atomic(&self.path, markup)
    }
}

/// In-memory region shared between the renderer and readers (the UI server).
#[derive(Debug, Clone, Default)]
pub struct SharedRegion {
    region: String,
    markup: Arc<Mutex<String>>,
}

impl SharedRegion {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            markup: Arc::default(),
        }
    }

    /// Current content of the region.
    pub fn snapshot(&self) -> Result<String> {
        self.markup
            .lock()
            .map(|markup| markup.clone())
            .map_err(|_| anyhow!("region {} lock poisoned", self.region))
    }
}

impl RenderTarget for SharedRegion {
    fn region_id(&self) -> &str {
        &self.region
    }

    fn replace(&mut self, markup: &str) -> Result<()> {
        let mut guard = self
            .markup
            .lock()
            .map_err(|_| anyhow!("region {} lock poisoned", self.region))?;
        *guard = markup.to_string();
        Ok(())
    }
}
