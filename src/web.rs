//! Browser boundary: the `wasm-bindgen` handle the host page drives.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns DOM events and rendering. It constructs one [`Board`],
//! forwards each gesture to it, and re-renders from `items_json` and the
//! canvas dimensions whenever the returned action list is non-empty. Ids and
//! payloads cross the boundary as strings; an id that does not parse is
//! treated like an unknown id.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::config::BoardConfig;
use crate::engine::{Action, BoardCore};
use crate::geom::{Point, Size};
use crate::item::ItemId;
use crate::repo::{JsonRepository, MemoryStorage, RepoError, SlotStorage};

// =============================================================================
// STORAGE
// =============================================================================

/// `localStorage` when the browser offers it, an in-memory slot otherwise
/// (privacy modes, sandboxed iframes).
pub enum BrowserStorage {
    Local(web_sys::Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    #[must_use]
    pub fn open() -> Self {
        match local_storage() {
            Ok(storage) => Self::Local(storage),
            Err(e) => {
                warn!(error = %e, "localStorage unavailable; board will not survive reloads");
                Self::Memory(MemoryStorage::new())
            }
        }
    }
}

fn local_storage() -> Result<web_sys::Storage, RepoError> {
    let window = web_sys::window().ok_or_else(|| RepoError::Storage("no window".into()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(RepoError::Storage("localStorage disabled".into())),
        Err(e) => Err(js_error(&e)),
    }
}

fn js_error(e: &JsValue) -> RepoError {
    RepoError::Storage(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl SlotStorage for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, RepoError> {
        match self {
            Self::Local(storage) => storage.get_item(key).map_err(|e| js_error(&e)),
            Self::Memory(storage) => storage.read(key),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), RepoError> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(|e| js_error(&e)),
            Self::Memory(storage) => storage.write(key, value),
        }
    }
}

// =============================================================================
// ENTRY
// =============================================================================

/// Install the panic hook and route log records to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        debug!("console logger already installed");
    }
}

/// The board handle exported to JavaScript.
#[wasm_bindgen]
pub struct Board {
    core: BoardCore<JsonRepository<BrowserStorage>>,
}

#[wasm_bindgen]
impl Board {
    /// Open the saved board for a viewport of the given size.
    ///
    /// `config_json` optionally overrides fields of the board config.
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f64, viewport_height: f64, config_json: Option<String>) -> Board {
        let config = config_json.as_deref().map(BoardConfig::from_json).unwrap_or_default();
        let repo = JsonRepository::with_key(BrowserStorage::open(), config.storage_key.clone());
        let core = BoardCore::new(repo, Size::new(viewport_width, viewport_height), config);
        Board { core }
    }

    // --- Gestures (each returns a JSON array of actions) ---

    pub fn create_at(&mut self, x: f64, y: f64) -> String {
        actions_json(&self.core.create_at(Point::new(x, y)))
    }

    pub fn drag_release(&mut self, id: &str, x: f64, y: f64) -> String {
        let Some(id) = parse_id(id) else {
            return actions_json(&[]);
        };
        actions_json(&self.core.drag_release(&id, Point::new(x, y)))
    }

    pub fn delete(&mut self, id: &str) -> String {
        let Some(id) = parse_id(id) else {
            return actions_json(&[]);
        };
        actions_json(&self.core.delete(&id))
    }

    pub fn clear_all(&mut self) -> String {
        actions_json(&self.core.clear_all())
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> String {
        let Some(id) = parse_id(id) else {
            return actions_json(&[]);
        };
        actions_json(&self.core.set_text(&id, text))
    }

    pub fn set_color(&mut self, id: &str, color: &str) -> String {
        let Some(id) = parse_id(id) else {
            return actions_json(&[]);
        };
        actions_json(&self.core.set_color(&id, color))
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) -> String {
        actions_json(&self.core.set_viewport(width, height))
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.core.set_scroll(Point::new(x, y));
    }

    // --- Reads ---

    /// All items as a JSON array, in insertion order.
    #[must_use]
    pub fn items_json(&self) -> String {
        to_json(self.core.store().items(), "[]")
    }

    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.core.store().canvas_width()
    }

    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.core.store().canvas_height()
    }
}

fn parse_id(raw: &str) -> Option<ItemId> {
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            debug!(id = raw, error = %e, "ignoring gesture for unparseable id");
            None
        }
    }
}

fn actions_json(actions: &[Action]) -> String {
    to_json(actions, "[]")
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to encode for host");
            fallback.to_owned()
        }
    }
}
