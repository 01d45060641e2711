//! Embassy async tasks
//!
//! The input task samples the encoders and feeds the control task through
//! [`crate::channels::INPUT_CHANNEL`].

pub mod control;
pub mod input;

pub use control::{control_task, OledDisplay};
pub use input::input_task;
