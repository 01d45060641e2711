//! Board-agnostic control engine for the sketch pad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Quadrature step decoding and button hold/repeat tracking
//! - Cursor, point history and raster canvas
//! - Time-windowed and step-windowed undo with linear redo
//! - Render scheduler batching input into one flush per cycle
//! - Configuration types, variant presets and the config parser
//! - Display capability trait

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod input;
pub mod scheduler;
pub mod traits;
