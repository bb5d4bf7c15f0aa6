// src/core/registry.rs
use crate::models::error::SError;
use crate::models::state::{ModState, ModStateEntry};
use crate::utils::toml::Toml;
use camino::Utf8Path;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Last known state of every mod, keyed by either its local or catalog id.
#[derive(Debug, Default)]
pub struct ModStateRegistry {
    // remove-then-insert has to happen under one lock
    entries: Mutex<Vec<ModStateEntry>>,
}

#[derive(Serialize, Deserialize, Default)]
struct StateSnapshot {
    entries: Vec<ModStateEntry>,
}

impl ModStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry that shares either id with a single new one.
    pub fn set(&self, local_id: &str, catalog_id: &str, state: ModState) {
        let mut entries = self.entries.lock();
        entries.retain(|e| e.local_id != local_id && e.catalog_id != catalog_id);
        entries.push(ModStateEntry {
            local_id: local_id.to_string(),
            catalog_id: catalog_id.to_string(),
            state,
        });
        debug!(local_id, catalog_id, ?state, "mod state updated");
    }

    /// Never-seen ids report `Downloadable`, the state of a mod before install.
    pub fn get(&self, id: &str) -> ModState {
        self.entries
            .lock()
            .iter()
            .find(|e| e.matches(id))
            .map(|e| e.state)
            .unwrap_or(ModState::Downloadable)
    }

    pub fn entry(&self, id: &str) -> Option<ModStateEntry> {
        self.entries.lock().iter().find(|e| e.matches(id)).cloned()
    }

    pub fn entries(&self) -> Vec<ModStateEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn save(&self, path: &Utf8Path) -> Result<(), SError> {
        Toml::write(
            path,
            &StateSnapshot {
                entries: self.entries(),
            },
        )
    }

    pub fn load(path: &Utf8Path) -> Result<Self, SError> {
        let snapshot: StateSnapshot = Toml::read(path)?;
        Ok(Self {
            entries: Mutex::new(snapshot.entries),
        })
    }
}
