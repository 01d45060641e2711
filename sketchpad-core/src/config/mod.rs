//! Configuration types, variant presets and parsing
//!
//! A [`SketchConfig`] selects canvas size, brush, undo policy, button mode
//! and encoder-to-axis mapping. Presets reproduce the physical builds; the
//! parser layers a TOML subset on top of a preset.

pub mod parse;
pub mod presets;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use presets::Variant;
pub use types::*;
