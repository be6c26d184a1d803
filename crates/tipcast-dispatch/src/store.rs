//! File-backed stores for the tip catalog and the dispatch state.
//! Both are plain JSON, read fully at start and replaced whole on write.

use std::path::{Path, PathBuf};

use tipcast_core::error::{Result, TipcastError};
use tipcast_core::types::{DispatchState, Tip};

/// The tip catalog file. Required input: a missing or unparsable catalog
/// is fatal for the run.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Load all tips.
    pub fn load(&self) -> Result<Vec<Tip>> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            TipcastError::Store(format!("Cannot read catalog {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            TipcastError::Store(format!("Corrupt catalog {}: {e}", self.path.display()))
        })
    }

    /// Write the full catalog back, whole-file replace.
    pub fn save(&self, tips: &[Tip]) -> Result<()> {
        let json = serde_json::to_string_pretty(tips)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("💾 Saved {} tips to {}", tips.len(), self.path.display());
        Ok(())
    }
}

/// The single dispatch state record. Tolerant on load: a missing or
/// malformed file is treated as "no state", which the reconciler turns
/// into a fresh day.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Load the persisted state, if any.
    pub fn load(&self) -> Option<DispatchState> {
        if !self.path.exists() {
            return None;
        }
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Malformed state file {} ({e}); starting fresh",
                        self.path.display()
                    );
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "⚠️ Failed to read state file {} ({e}); starting fresh",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Persist the state, whole-file replace.
    pub fn save(&self, state: &DispatchState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("💾 Saved dispatch state to {}", self.path.display());
        Ok(())
    }
}
