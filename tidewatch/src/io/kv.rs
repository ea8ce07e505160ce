//! Key/value storage backends for persisted widget state.
//!
//! The [`KeyValueStore`] trait stands in for the browser's local storage. The
//! file backend keeps one JSON document per key; the memory backend is used
//! when no durable medium is available and in tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use super::config::validate_identifier;

/// Text-valued key/value storage medium.
pub trait KeyValueStore {
    /// Read the value stored at `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Store `value` at `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store backed by a directory, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_identifier("storage key", key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "read stored value");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        debug!(path = %path.display(), bytes = value.len(), "writing stored value");
        super::write_atomic(&path, value)
    }
}

/// In-process store. Can be told to reject writes, like a full or disabled
/// browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn rejecting_writes() -> Self {
        Self {
            values: HashMap::new(),
            reject_writes: true,
        }
    }

    /// Seed a value directly, bypassing `reject_writes`.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(anyhow!("storage quota exceeded writing {key}"));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
