#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point on the canvas in CSS pixels. Also used for the item anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates to `>= 0`. Non-finite coordinates become `0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: non_negative(self.x), y: non_negative(self.y) }
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn offset_by(self, offset: Point) -> Self {
        Self { x: self.x + offset.x, y: self.y + offset.y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Size) -> Self {
        Self { width: self.width.max(other.width), height: self.height.max(other.height) }
    }

    /// Both dimensions finite and strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
