//! Gesture core: turns host gestures into store mutations.
//!
//! The host page wires DOM events and calls one method per gesture with
//! client (viewport) coordinates. `BoardCore` adds the current scroll offset
//! to get canvas coordinates, calls the store, and reports what changed as a
//! list of [`Action`]s so the host knows what to re-render.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::config::BoardConfig;
use crate::geom::{Point, Size};
use crate::item::{CanvasItem, ItemId, NoteData, NoteEdit, truncate_chars};
use crate::repo::Repository;
use crate::store::CanvasStore;

/// Changes reported back to the host after a gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ItemCreated(CanvasItem),
    ItemMoved { id: ItemId, position: Point },
    ItemUpdated { id: ItemId },
    ItemDeleted { id: ItemId },
    Cleared,
    CanvasResized { width: f64, height: f64 },
}

/// Board state plus the host-facing gesture handlers.
pub struct BoardCore<R> {
    store: CanvasStore<R>,
    config: BoardConfig,
    scroll: Point,
}

impl<R: Repository> BoardCore<R> {
    /// Open the board from `repo` for a host whose viewport is `viewport`.
    pub fn new(repo: R, viewport: Size, config: BoardConfig) -> Self {
        Self { store: CanvasStore::open(repo, viewport), config: config.sanitized(), scroll: Point::default() }
    }

    // --- Host state ---

    /// Record the page scroll offset used to translate client coordinates.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    /// The browser window was resized.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        let before = self.store.canvas_size();
        self.store.set_viewport(Size::new(width, height));
        self.with_resize(before, Vec::new())
    }

    // --- Gestures ---

    /// Click on empty canvas: create a blank note anchored at the click.
    pub fn create_at(&mut self, client: Point) -> Vec<Action> {
        let before = self.store.canvas_size();
        let note = NoteData { text: String::new(), background_color: self.config.default_color.clone() };
        let item = CanvasItem::note_with(self.to_canvas(client), self.config.note_size(), note);
        let id = item.id;
        if !self.store.insert(item) {
            return Vec::new();
        }
        let created = self.store.get(&id).cloned();
        self.with_resize(before, created.into_iter().map(Action::ItemCreated).collect())
    }

    /// A dragged note was released with its top-left corner at `client`.
    pub fn drag_release(&mut self, id: &ItemId, client: Point) -> Vec<Action> {
        let before = self.store.canvas_size();
        if !self.store.move_item(id, self.to_canvas(client)) {
            return Vec::new();
        }
        let moved = self.store.get(id).map(|item| Action::ItemMoved { id: *id, position: item.position });
        self.with_resize(before, moved.into_iter().collect())
    }

    /// Delete button on a note.
    pub fn delete(&mut self, id: &ItemId) -> Vec<Action> {
        let before = self.store.canvas_size();
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        self.with_resize(before, vec![Action::ItemDeleted { id: *id }])
    }

    /// Clear button.
    pub fn clear_all(&mut self) -> Vec<Action> {
        let before = self.store.canvas_size();
        if !self.store.clear() {
            return Vec::new();
        }
        self.with_resize(before, vec![Action::Cleared])
    }

    /// Text typed into a note. Text past the configured limit is dropped.
    pub fn set_text(&mut self, id: &ItemId, text: &str) -> Vec<Action> {
        let edit = NoteEdit::text(truncate_chars(text, self.config.max_text_len));
        self.edit(id, &edit)
    }

    /// Color picked for a note. Non-hex colors are ignored.
    pub fn set_color(&mut self, id: &ItemId, color: &str) -> Vec<Action> {
        self.edit(id, &NoteEdit::background_color(color))
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &CanvasStore<R> {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    // --- Internals ---

    fn edit(&mut self, id: &ItemId, edit: &NoteEdit) -> Vec<Action> {
        if self.store.update_note(id, edit) { vec![Action::ItemUpdated { id: *id }] } else { Vec::new() }
    }

    fn to_canvas(&self, client: Point) -> Point {
        client.offset_by(self.scroll)
    }

    fn with_resize(&self, before: Size, mut actions: Vec<Action>) -> Vec<Action> {
        let after = self.store.canvas_size();
        if after != before {
            actions.push(Action::CanvasResized { width: after.width, height: after.height });
        }
        actions
    }
}
