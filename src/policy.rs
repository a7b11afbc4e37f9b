//! Grow and shrink rules for the logical canvas.
//!
//! Growth is additive: an item that pokes past an edge grows that dimension
//! by one item-width (or height), not to an exact fit. Shrinking is a coarse
//! snap back to the viewport, taken only when no remaining item reaches past
//! the viewport on that axis.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::geom::{Point, Size};
use crate::item::CanvasItem;

/// Canvas size after placing an item of `size` at `position`.
///
/// Each axis grows by the item's extent on that axis when the item's far
/// edge passes the current canvas edge. Never shrinks, and an axis whose
/// step would leave finite range keeps its current size.
#[must_use]
pub fn grow(canvas: Size, position: Point, size: Size) -> Size {
    let mut next = canvas;
    if position.x + size.width > canvas.width {
        next.width = step(canvas.width, size.width);
    }
    if position.y + size.height > canvas.height {
        next.height = step(canvas.height, size.height);
    }
    next
}

fn step(current: f64, by: f64) -> f64 {
    let grown = current + by;
    if grown.is_finite() && grown >= current { grown } else { current }
}

/// Farthest right/bottom edge reached by any of `items`, or `None` if empty.
#[must_use]
pub fn farthest_extent(items: &[CanvasItem]) -> Option<Point> {
    items.iter().map(CanvasItem::far_corner).reduce(|acc, corner| {
        Point::new(acc.x.max(corner.x), acc.y.max(corner.y))
    })
}

/// Canvas size after an item has been removed, given the remaining `items`.
///
/// An axis whose farthest extent fits inside the viewport snaps to the
/// viewport; the other axis keeps its current size. An empty board resets
/// both axes.
#[must_use]
pub fn shrink(canvas: Size, viewport: Size, items: &[CanvasItem]) -> Size {
    let Some(extent) = farthest_extent(items) else {
        return viewport;
    };
    Size {
        width: if extent.x <= viewport.width { viewport.width } else { canvas.width },
        height: if extent.y <= viewport.height { viewport.height } else { canvas.height },
    }
}
