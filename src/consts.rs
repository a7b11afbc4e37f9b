//! Shared defaults for the board crate.

// ── Sticky notes ────────────────────────────────────────────────

/// Width of a newly created note in CSS pixels.
pub const NOTE_WIDTH: f64 = 230.0;

/// Height of a newly created note in CSS pixels.
pub const NOTE_HEIGHT: f64 = 300.0;

/// Background color given to notes that never had one picked.
pub const DEFAULT_NOTE_COLOR: &str = "#8aaee8";

/// Maximum number of characters a note can hold.
pub const MAX_NOTE_TEXT_LEN: usize = 336;

// ── Viewport ────────────────────────────────────────────────────

/// Viewport width assumed when the host reports an unusable size.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Viewport height assumed when the host reports an unusable size.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

// ── Persistence ─────────────────────────────────────────────────

/// Storage slot holding the board snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "corkboard:board";

/// Pre-versioning slot for the canvas width (bare number as a string).
pub const LEGACY_WIDTH_KEY: &str = "canvasWidth";

/// Pre-versioning slot for the canvas height (bare number as a string).
pub const LEGACY_HEIGHT_KEY: &str = "canvasHeight";
