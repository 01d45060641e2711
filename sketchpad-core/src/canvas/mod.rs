//! Cursor, point history and raster canvas
//!
//! The [`Engine`] owns every piece of drawing state: cursor, history, redo
//! stack, draw clock and raster. It is mutated only by unit cursor steps
//! and by undo/redo, and keeps `Canvas == render(History)` after each one.

pub mod engine;
pub mod history;
pub mod raster;
pub mod undo;

pub use engine::{Cursor, DrawClock, Engine};
pub use history::{History, Point, RedoStack};
pub use raster::{Damage, Raster, MAX_DAMAGE_CELLS};
