//! Item model: what sits on the canvas.
//!
//! A `CanvasItem` is a fixed-size widget anchored at its top-left corner. Its
//! payload is a tagged `ItemData` rather than an open map so that every kind
//! of widget carries a known shape. Sticky notes are the only kind today.
//!
//! `NoteEdit` is the sparse update the host sends when the user types into a
//! note or picks a new color; only present fields are applied.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_NOTE_COLOR;
use crate::geom::{Point, Size};

/// Unique identifier for a canvas item.
pub type ItemId = Uuid;

/// A positioned, sized widget on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    /// Unique identifier, assigned at creation.
    pub id: ItemId,
    /// Fixed at creation.
    pub size: Size,
    /// Top-left anchor. Never negative once the item is in a store.
    pub position: Point,
    /// Widget payload.
    pub data: ItemData,
}

impl CanvasItem {
    /// Create a sticky note with a fresh id, empty text and the default color.
    #[must_use]
    pub fn note(position: Point, size: Size) -> Self {
        Self::note_with(position, size, NoteData::default())
    }

    /// Create a sticky note with a fresh id and the given payload.
    #[must_use]
    pub fn note_with(position: Point, size: Size, note: NoteData) -> Self {
        Self { id: Uuid::new_v4(), size, position, data: ItemData::Note(note) }
    }

    /// Right/bottom corner of the item's bounding box.
    #[must_use]
    pub fn far_corner(&self) -> Point {
        Point::new(self.position.x + self.size.width, self.position.y + self.size.height)
    }

    /// Positive finite size with a finite far corner. Anything else would
    /// push the canvas below the viewport or out of finite range.
    #[must_use]
    pub fn has_usable_geometry(&self) -> bool {
        let corner = self.far_corner();
        self.size.is_positive() && corner.x.is_finite() && corner.y.is_finite()
    }

    /// The note payload, if this item is a note.
    #[must_use]
    pub fn as_note(&self) -> Option<&NoteData> {
        match &self.data {
            ItemData::Note(note) => Some(note),
        }
    }
}

/// Per-kind item payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemData {
    /// A sticky note.
    Note(NoteData),
}

/// Payload of a sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    /// Note body. Defaults to empty.
    #[serde(default)]
    pub text: String,
    /// CSS hex color. Defaults to [`DEFAULT_NOTE_COLOR`].
    #[serde(default = "default_note_color")]
    pub background_color: String,
}

impl Default for NoteData {
    fn default() -> Self {
        Self { text: String::new(), background_color: default_note_color() }
    }
}

fn default_note_color() -> String {
    DEFAULT_NOTE_COLOR.to_owned()
}

impl NoteData {
    /// Merge `edit` into this note. Returns true if anything changed.
    ///
    /// A color that is not a CSS hex color is ignored.
    pub fn apply(&mut self, edit: &NoteEdit) -> bool {
        let mut changed = false;
        if let Some(text) = &edit.text {
            if *text != self.text {
                self.text.clone_from(text);
                changed = true;
            }
        }
        if let Some(color) = &edit.background_color {
            if is_hex_color(color) && *color != self.background_color {
                self.background_color.clone_from(color);
                changed = true;
            }
        }
        changed
    }
}

/// Sparse update for a note. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl NoteEdit {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), background_color: None }
    }

    #[must_use]
    pub fn background_color(color: impl Into<String>) -> Self {
        Self { text: None, background_color: Some(color.into()) }
    }
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[must_use]
pub fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Cut `text` down to at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_owned(),
        None => text.to_owned(),
    }
}
