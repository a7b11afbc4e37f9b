//! Canvas item store — the single writer for board state.
//!
//! DESIGN
//! ======
//! `CanvasStore` owns the ordered item list, the logical canvas size and the
//! host's last reported viewport. Every mutation runs to completion, applies
//! the grow or shrink policy, and then saves a snapshot through the injected
//! repository if anything changed. Readers only ever see settled state.
//!
//! ERROR HANDLING
//! ==============
//! Operations are total. Unknown ids are silent no-ops. A snapshot that fails
//! to load starts an empty board; a save that fails is logged and the
//! in-memory state stays authoritative.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::geom::{Point, Size};
use crate::item::{CanvasItem, ItemData, ItemId, NoteEdit};
use crate::policy;
use crate::repo::{BoardSnapshot, Repository};

/// Ordered store of canvas items plus the canvas dimensions.
pub struct CanvasStore<R> {
    items: Vec<CanvasItem>,
    canvas: Size,
    viewport: Size,
    repo: R,
}

impl<R: Repository> CanvasStore<R> {
    /// Open a store seeded from `repo`.
    ///
    /// Missing or unreadable state yields an empty board sized to `viewport`.
    /// A viewport that `set_viewport` would reject is replaced by a default.
    pub fn open(repo: R, viewport: Size) -> Self {
        let viewport = if viewport.is_positive() {
            viewport
        } else {
            warn!(width = viewport.width, height = viewport.height, "invalid viewport; using default");
            Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
        };
        let mut store = Self { items: Vec::new(), canvas: viewport, viewport, repo };
        match store.repo.load() {
            Ok(Some(snapshot)) => store.hydrate(snapshot),
            Ok(None) => debug!("no saved board; starting empty"),
            Err(e) => warn!(error = %e, "saved board unreadable; starting empty"),
        }
        store
    }

    fn hydrate(&mut self, snapshot: BoardSnapshot) {
        let total = snapshot.items.len();
        let mut seen = HashSet::with_capacity(total);
        for mut item in snapshot.items {
            item.position = item.position.clamped();
            if !item.has_usable_geometry() {
                warn!(id = %item.id, "dropping saved item with invalid size");
                continue;
            }
            if !seen.insert(item.id) {
                warn!(id = %item.id, "dropping saved item with duplicate id");
                continue;
            }
            self.items.push(item);
        }
        let saved = Size::new(finite_or_zero(snapshot.canvas_width), finite_or_zero(snapshot.canvas_height));
        self.canvas = saved.max(self.viewport);
        info!(
            items = self.items.len(),
            dropped = total - self.items.len(),
            canvas_width = self.canvas.width,
            canvas_height = self.canvas.height,
            "board restored"
        );
    }

    // --- Mutations ---

    /// Append `item`, growing the canvas if it reaches past an edge.
    ///
    /// An existing item with the same id is removed first so ids stay unique.
    /// Items with a non-positive or non-finite extent are rejected and the
    /// call returns false.
    pub fn insert(&mut self, mut item: CanvasItem) -> bool {
        item.position = item.position.clamped();
        if !item.has_usable_geometry() {
            warn!(
                id = %item.id,
                width = item.size.width,
                height = item.size.height,
                "rejecting item with invalid size"
            );
            return false;
        }
        if let Some(idx) = self.index_of(&item.id) {
            debug!(id = %item.id, "replacing item with duplicate id");
            self.items.remove(idx);
        }
        self.canvas = policy::grow(self.canvas, item.position, item.size);
        debug!(id = %item.id, x = item.position.x, y = item.position.y, "item inserted");
        self.items.push(item);
        self.persist();
        true
    }

    /// Move an item's anchor. Returns false if `id` is unknown or the new
    /// position would put the item's far corner out of finite range.
    pub fn move_item(&mut self, id: &ItemId, position: Point) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let position = position.clamped();
        let item = &mut self.items[idx];
        let corner = Point::new(position.x + item.size.width, position.y + item.size.height);
        if !(corner.x.is_finite() && corner.y.is_finite()) {
            warn!(%id, x = position.x, y = position.y, "rejecting move out of range");
            return false;
        }
        let before = (item.position, self.canvas);
        item.position = position;
        self.canvas = policy::grow(self.canvas, position, item.size);
        if before == (position, self.canvas) {
            return true;
        }
        debug!(%id, x = position.x, y = position.y, "item moved");
        self.persist();
        true
    }

    /// Remove an item and shrink the canvas if nothing else needs the room.
    pub fn remove(&mut self, id: &ItemId) -> Option<CanvasItem> {
        let idx = self.index_of(id)?;
        let removed = self.items.remove(idx);
        self.canvas = policy::shrink(self.canvas, self.viewport, &self.items);
        debug!(%id, remaining = self.items.len(), "item removed");
        self.persist();
        Some(removed)
    }

    /// Remove every item and reset the canvas to the viewport.
    ///
    /// Returns false if the board was already empty and viewport-sized.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() && self.canvas == self.viewport {
            return false;
        }
        self.items.clear();
        self.canvas = self.viewport;
        debug!("board cleared");
        self.persist();
        true
    }

    /// Merge a note edit. Returns false if `id` is unknown or nothing changed.
    pub fn update_note(&mut self, id: &ItemId, edit: &NoteEdit) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let changed = match &mut self.items[idx].data {
            ItemData::Note(note) => note.apply(edit),
        };
        if changed {
            debug!(%id, "note updated");
            self.persist();
        }
        changed
    }

    /// Record a new viewport size. The canvas is raised to cover it but never
    /// shrunk. Returns false for unusable sizes or no change.
    pub fn set_viewport(&mut self, viewport: Size) -> bool {
        if !viewport.is_positive() {
            warn!(width = viewport.width, height = viewport.height, "ignoring invalid viewport");
            return false;
        }
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        let canvas = self.canvas.max(viewport);
        if canvas != self.canvas {
            self.canvas = canvas;
            self.persist();
        }
        true
    }

    // --- Queries ---

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas.width
    }

    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.canvas.height
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current state in persisted form.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.items.clone(), self.canvas.width, self.canvas.height)
    }

    #[must_use]
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // --- Internals ---

    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.repo.save(&snapshot) {
            warn!(error = %e, items = snapshot.items.len(), "failed to save board");
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
