//! Sketchpad Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the sketch engine consumes.
//! Chip-specific code (the RP2040 firmware, host test doubles) implements
//! them so the same control logic runs against any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sketchpad-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sketchpad-core (engine, scheduler)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sketchpad-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital level reads for encoder and button lines
//! - [`clock::Clock`] - Wrapping millisecond counter

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::{Clock, Millis};
pub use gpio::{InputPin, Level};
