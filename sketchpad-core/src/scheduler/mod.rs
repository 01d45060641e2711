//! Render scheduler
//!
//! Accumulates decoded input between cycles and applies it to the engine in
//! a fixed order, then flushes the canvas with a single `present()`.

pub mod render;

pub use render::{CycleReport, RenderScheduler};
