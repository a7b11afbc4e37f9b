//! Persistence boundary for the board.
//!
//! DESIGN
//! ======
//! The store never touches a storage medium. It is handed a `Repository` at
//! construction, loads once, and saves a `BoardSnapshot` after every settled
//! mutation. `JsonRepository` encodes snapshots as one versioned JSON document
//! in a string key/value slot (`SlotStorage`), which is what the browser's
//! `localStorage` offers. `MemoryStorage` is the native stand-in.
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces as `RepoError`. The store decides what to do with
//! it: a failed load starts an empty board, a failed save is logged and the
//! in-memory state stays authoritative.

#[cfg(test)]
#[path = "repo_test.rs"]
mod repo_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{DEFAULT_STORAGE_KEY, LEGACY_HEIGHT_KEY, LEGACY_WIDTH_KEY};
use crate::item::CanvasItem;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

/// Persisted form of the store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Format version, always [`SNAPSHOT_VERSION`] when written.
    pub version: u32,
    pub items: Vec<CanvasItem>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl BoardSnapshot {
    #[must_use]
    pub fn new(items: Vec<CanvasItem>, canvas_width: f64, canvas_height: f64) -> Self {
        Self { version: SNAPSHOT_VERSION, items, canvas_width, canvas_height }
    }
}

/// Loads and saves board snapshots.
pub trait Repository {
    /// Read the stored snapshot. `Ok(None)` means nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be read or decoded.
    fn load(&self) -> Result<Option<BoardSnapshot>, RepoError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    fn save(&mut self, snapshot: &BoardSnapshot) -> Result<(), RepoError>;
}

/// A durable string key/value slot.
pub trait SlotStorage {
    /// # Errors
    ///
    /// Returns an error if the backend refuses the read.
    fn read(&self, key: &str) -> Result<Option<String>, RepoError>;

    /// # Errors
    ///
    /// Returns an error if the backend refuses the write (quota, privacy mode).
    fn write(&mut self, key: &str, value: &str) -> Result<(), RepoError>;
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-process `SlotStorage`. Counts writes so callers can observe saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without counting it as a write.
    #[must_use]
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Raw slot contents.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of writes performed through [`SlotStorage::write`].
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, RepoError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), RepoError> {
        self.slots.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }
}

// =============================================================================
// JSON REPOSITORY
// =============================================================================

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// `Repository` storing a JSON-encoded snapshot under a single key.
#[derive(Debug, Clone)]
pub struct JsonRepository<S> {
    storage: S,
    key: String,
}

impl<S: SlotStorage> JsonRepository<S> {
    /// Repository using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the bare `canvasWidth` / `canvasHeight` slots written before
    /// snapshots were versioned. Items were never persisted in that layout.
    fn load_legacy(&self) -> Result<Option<BoardSnapshot>, RepoError> {
        let width = read_legacy_dimension(&self.storage, LEGACY_WIDTH_KEY)?;
        let height = read_legacy_dimension(&self.storage, LEGACY_HEIGHT_KEY)?;
        if width.is_none() && height.is_none() {
            return Ok(None);
        }
        debug!(?width, ?height, "migrating legacy canvas dimensions");
        Ok(Some(BoardSnapshot::new(Vec::new(), width.unwrap_or(0.0), height.unwrap_or(0.0))))
    }
}

fn read_legacy_dimension<S: SlotStorage>(storage: &S, key: &str) -> Result<Option<f64>, RepoError> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => {
            warn!(key, raw = %raw, "ignoring unparseable legacy dimension");
            Ok(None)
        }
    }
}

impl<S: SlotStorage> Repository for JsonRepository<S> {
    fn load(&self) -> Result<Option<BoardSnapshot>, RepoError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return self.load_legacy();
        };
        let probe: VersionProbe = serde_json::from_str(&raw)?;
        if probe.version != SNAPSHOT_VERSION {
            return Err(RepoError::UnsupportedVersion(probe.version));
        }
        let snapshot: BoardSnapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &BoardSnapshot) -> Result<(), RepoError> {
        let raw = serde_json::to_string(snapshot)?;
        self.storage.write(&self.key, &raw)
    }
}
