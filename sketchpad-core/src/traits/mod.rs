//! Hardware capability traits
//!
//! These traits define the interface between the sketch engine and the
//! panel-specific drivers.

pub mod display;

pub use display::{draw_boot_frame, Display, DisplayError};
