//! State core for a browser-hosted sticky-note board.
//!
//! The host page renders notes and forwards user gestures; this crate owns
//! everything behind that: the list of placed notes, the logical canvas size
//! and its grow/shrink policy, and persistence of the board through an
//! injected repository. On `wasm32` the `web` module exposes the whole
//! thing to JavaScript backed by `localStorage`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | `CanvasStore`: the single-writer item store |
//! | [`policy`] | Grow and shrink rules for the canvas dimensions |
//! | [`item`] | Canvas items and their typed note payload |
//! | [`geom`] | Points and sizes in CSS pixels |
//! | [`repo`] | Repository trait, snapshot format, storage slots |
//! | [`engine`] | `BoardCore`: gesture-to-store translation |
//! | [`config`] | Tunable board settings |
//! | [`consts`] | Shared defaults (note size, colors, storage keys) |
//! | `web` | `wasm-bindgen` boundary (wasm32 only) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod item;
pub mod policy;
pub mod repo;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;
