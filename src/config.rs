//! Board settings supplied by the host page.
//!
//! Every field has a default from [`crate::consts`]; the host may override any
//! subset by passing a JSON object. Unusable values fall back to the default
//! rather than failing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_NOTE_COLOR, DEFAULT_STORAGE_KEY, MAX_NOTE_TEXT_LEN, NOTE_HEIGHT, NOTE_WIDTH};
use crate::geom::Size;
use crate::item::is_hex_color;

/// Tuning knobs for a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Storage slot the snapshot is saved under.
    pub storage_key: String,
    /// Width of newly created notes.
    pub note_width: f64,
    /// Height of newly created notes.
    pub note_height: f64,
    /// Maximum characters kept from note text edits.
    pub max_text_len: usize,
    /// Background color of newly created notes.
    pub default_color: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            note_width: NOTE_WIDTH,
            note_height: NOTE_HEIGHT,
            max_text_len: MAX_NOTE_TEXT_LEN,
            default_color: DEFAULT_NOTE_COLOR.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Parse a JSON config object. Malformed input yields the defaults.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                warn!(error = %e, "invalid board config; using defaults");
                Self::default()
            }
        }
    }

    /// Replace unusable fields with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.storage_key.trim().is_empty() {
            warn!("empty storage key; using default");
            self.storage_key = defaults.storage_key;
        }
        if !self.note_size().is_positive() {
            warn!(width = self.note_width, height = self.note_height, "invalid note size; using default");
            self.note_width = defaults.note_width;
            self.note_height = defaults.note_height;
        }
        if self.max_text_len == 0 {
            self.max_text_len = defaults.max_text_len;
        }
        if !is_hex_color(&self.default_color) {
            warn!(color = %self.default_color, "invalid default color; using default");
            self.default_color = defaults.default_color;
        }
        self
    }

    #[must_use]
    pub fn note_size(&self) -> Size {
        Size::new(self.note_width, self.note_height)
    }
}
