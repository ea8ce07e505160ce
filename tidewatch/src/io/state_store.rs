//! Single-writer store owning the persisted application state.
//!
//! Every mutation goes through this type. Storage failures never reach the
//! caller: they are logged and the in-memory state stays authoritative.

use anyhow::{Context, Result};
use chrono::Local;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::kv::KeyValueStore;
use crate::core::join::apply_join;
use crate::core::merge::shallow_merge;
use crate::core::types::{ApplicationState, JoinReceipt, Location};

/// Owns the [`ApplicationState`] and persists it under a fixed key.
#[derive(Debug)]
pub struct StateStore<S> {
    storage: S,
    key: String,
    state: ApplicationState,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Create a store holding default state. Nothing is read until [`load`].
    ///
    /// [`load`]: StateStore::load
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: ApplicationState::default(),
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Merge previously persisted state over the defaults.
    ///
    /// Absent, unreadable, or malformed stored values leave the defaults in
    /// place.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn load(&mut self) {
        match self.read_stored() {
            Ok(Some(merged)) => {
                info!(
                    crew = merged.crew.len(),
                    cleanups_joined = ?merged.user_stats.cleanups_joined,
                    "restored saved state"
                );
                self.state = merged;
            }
            Ok(None) => debug!("no saved state, using defaults"),
            Err(err) => warn!(error = %format!("{err:#}"), "ignoring saved state"),
        }
    }

    fn read_stored(&self) -> Result<Option<ApplicationState>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let stored: Value = serde_json::from_str(&raw).context("parse saved state")?;
        shallow_merge(&ApplicationState::default(), stored).map(Some)
    }

    /// Persist the full state. Failures are logged, never returned.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn save(&mut self) {
        if let Err(err) = self.write_state() {
            warn!(error = %format!("{err:#}"), "failed to save state, continuing in memory");
        }
    }

    fn write_state(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.state).context("serialize state")?;
        self.storage.set(&self.key, &payload)
    }

    /// Join `cleanup` today, drawing randomness from the thread RNG.
    pub fn join(&mut self, cleanup: &str) -> JoinReceipt {
        let joined = Local::now().format("%-m/%-d/%Y").to_string();
        self.join_with(cleanup, &joined, &mut rand::thread_rng())
    }

    /// Join `cleanup` with an explicit join date and RNG, then save.
    pub fn join_with<R: Rng + ?Sized>(
        &mut self,
        cleanup: &str,
        joined: &str,
        rng: &mut R,
    ) -> JoinReceipt {
        let receipt = apply_join(&mut self.state, cleanup, joined, rng);
        if receipt.crew_added {
            info!(cleanup, crew_name = %receipt.crew_name, "joined cleanup");
        } else {
            warn!(
                cleanup,
                crew_name = %receipt.crew_name,
                "crew name already taken, crew unchanged"
            );
        }
        self.save();
        receipt
    }

    /// Record the user's location and save.
    pub fn set_location(&mut self, location: Location) {
        self.state.user_location = Some(location);
        self.save();
    }
}
