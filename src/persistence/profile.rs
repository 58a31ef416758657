//! Typed profile data on top of a `KeyValueStore`.
//!
//! Reads are forgiving: a missing or malformed value falls back to its
//! default and logs a warning, so a corrupted profile never blocks play.
//! Writes surface `StorageError` to the caller.

use super::store::{KeyValueStore, Result};
use crate::artefacts::{ArtefactId, MAX_SELECTED_ARTEFACTS};
use crate::core::GameState;

/// Storage keys.
pub mod keys {
    pub const ARCANE_DUST: &str = "arcane_dust";
    pub const OWNED_ARTEFACTS: &str = "owned_artefacts";
    pub const SELECTED_ARTEFACTS: &str = "selected_artefacts";
    pub const SOLO_RUN_STATE: &str = "solo_run_state";
    pub const LONGEST_RUN: &str = "longest_run";
}

/// Persistent player profile.
#[derive(Debug)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "profile read failed");
                None
            }
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, %err, "discarding malformed profile value");
                None
            }
        }
    }

    /// Banked currency. Unparseable or negative values read as 0.
    #[must_use]
    pub fn arcane_dust(&self) -> u64 {
        let Some(raw) = self.read(keys::ARCANE_DUST) else {
            return 0;
        };
        match raw.trim().parse::<i128>() {
            Ok(value) => u64::try_from(value.max(0)).unwrap_or(u64::MAX),
            Err(err) => {
                tracing::warn!(%err, raw = %raw, "arcane dust is not a number");
                0
            }
        }
    }

    pub fn set_arcane_dust(&self, amount: u64) -> Result<()> {
        self.store.set(keys::ARCANE_DUST, &amount.to_string())
    }

    /// Add to the banked currency, returning the new balance.
    pub fn add_arcane_dust(&self, amount: u64) -> Result<u64> {
        let total = self.arcane_dust().saturating_add(amount);
        self.set_arcane_dust(total)?;
        Ok(total)
    }

    /// Owned artefacts. Malformed data reads as none owned.
    #[must_use]
    pub fn owned_artefacts(&self) -> Vec<ArtefactId> {
        let mut owned: Vec<ArtefactId> = self.read_json(keys::OWNED_ARTEFACTS).unwrap_or_default();
        owned.sort();
        owned.dedup();
        owned
    }

    pub fn set_owned_artefacts(&self, owned: &[ArtefactId]) -> Result<()> {
        self.store
            .set(keys::OWNED_ARTEFACTS, &serde_json::to_string(owned)?)
    }

    /// Selected artefacts, at most `MAX_SELECTED_ARTEFACTS`.
    #[must_use]
    pub fn selected_artefacts(&self) -> Vec<ArtefactId> {
        let mut selected: Vec<ArtefactId> = self
            .read_json(keys::SELECTED_ARTEFACTS)
            .unwrap_or_default();
        let mut seen = Vec::with_capacity(selected.len());
        selected.retain(|id| {
            let fresh = !seen.contains(id);
            seen.push(*id);
            fresh
        });
        selected.truncate(MAX_SELECTED_ARTEFACTS);
        selected
    }

    /// Write the selection, truncated to `MAX_SELECTED_ARTEFACTS`.
    pub fn set_selected_artefacts(&self, selected: &[ArtefactId]) -> Result<()> {
        let kept = &selected[..selected.len().min(MAX_SELECTED_ARTEFACTS)];
        self.store
            .set(keys::SELECTED_ARTEFACTS, &serde_json::to_string(kept)?)
    }

    /// The saved run, if one exists and parses.
    #[must_use]
    pub fn saved_run(&self) -> Option<GameState> {
        self.read_json(keys::SOLO_RUN_STATE)
    }

    pub fn save_run(&self, state: &GameState) -> Result<()> {
        self.store
            .set(keys::SOLO_RUN_STATE, &serde_json::to_string(state)?)
    }

    pub fn clear_run(&self) -> Result<()> {
        self.store.remove(keys::SOLO_RUN_STATE)
    }

    #[must_use]
    pub fn has_saved_run(&self) -> bool {
        self.store.contains(keys::SOLO_RUN_STATE)
    }

    /// Deepest game index reached. Malformed values read as 0.
    #[must_use]
    pub fn longest_run(&self) -> u32 {
        self.read(keys::LONGEST_RUN)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Record a run reaching `game_index`; keeps the maximum.
    pub fn record_run_length(&self, game_index: u32) -> Result<u32> {
        let longest = self.longest_run().max(game_index);
        self.store.set(keys::LONGEST_RUN, &longest.to_string())?;
        Ok(longest)
    }
}
