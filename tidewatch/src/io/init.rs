//! Initialization helpers for `.tidewatch/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{TidewatchConfig, write_config};

const TIDEWATCH_GITIGNORE: &str = "storage/\nregions/\n";

/// All canonical paths within `.tidewatch/` for a project root.
#[derive(Debug, Clone)]
pub struct TidewatchPaths {
    pub root: PathBuf,
    pub tidewatch_dir: PathBuf,
    pub config_path: PathBuf,
    pub gitignore_path: PathBuf,
    /// Directory backing the key/value store.
    pub storage_dir: PathBuf,
    /// Directory holding rendered display regions.
    pub regions_dir: PathBuf,
}

impl TidewatchPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let tidewatch_dir = root.join(".tidewatch");
        Self {
            root: root.clone(),
            tidewatch_dir: tidewatch_dir.clone(),
            config_path: tidewatch_dir.join("config.toml"),
            gitignore_path: tidewatch_dir.join(".gitignore"),
            storage_dir: tidewatch_dir.join("storage"),
            regions_dir: tidewatch_dir.join("regions"),
        }
    }
}

/// Options for `init_tidewatch`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite an existing config with defaults.
    pub force: bool,
}

/// Create `.tidewatch/` scaffolding in `root`.
///
/// Fails if the config already exists unless `options.force` is set. Stored
/// state is never touched.
pub fn init_tidewatch(root: &Path, options: &InitOptions) -> Result<TidewatchPaths> {
    let paths = TidewatchPaths::new(root);
    if paths.tidewatch_dir.exists() && !paths.tidewatch_dir.is_dir() {
        return Err(anyhow!(
            "tidewatch init: .tidewatch exists but is not a directory"
        ));
    }
    if paths.config_path.exists() && !options.force {
        return Err(anyhow!(
            "tidewatch init: config already exists (use --force to overwrite)"
        ));
    }

    create_dir(&paths.tidewatch_dir)?;
    create_dir(&paths.storage_dir)?;
    create_dir(&paths.regions_dir)?;
    fs::write(&paths.gitignore_path, TIDEWATCH_GITIGNORE)
        .with_context(|| format!("write {}", paths.gitignore_path.display()))?;
    write_config(&paths.config_path, &TidewatchConfig::default())?;

    Ok(paths)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::load_config;

    #[test]
    fn init_creates_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_tidewatch(temp.path(), &InitOptions { force: false }).expect("init");
        assert!(paths.storage_dir.is_dir());
        assert!(paths.regions_dir.is_dir());
        assert!(paths.gitignore_path.is_file());
        let cfg = load_config(&paths.config_path).expect("config");
        assert_eq!(cfg, TidewatchConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_tidewatch(temp.path(), &InitOptions { force: false }).expect("init");
        let err = init_tidewatch(temp.path(), &InitOptions { force: false }).unwrap_err();
        assert!(err.to_string().contains("--force"));
        init_tidewatch(temp.path(), &InitOptions { force: true }).expect("force init");
    }
}
