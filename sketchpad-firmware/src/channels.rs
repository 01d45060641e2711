//! Inter-task communication channels
//!
//! The input task is the only producer and the control task the only
//! consumer, so events reach the scheduler in the order they were sampled.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use sketchpad_core::input::InputEvent;

/// Channel capacity for decoded input events
const INPUT_CHANNEL_SIZE: usize = 32;

/// Decoded encoder steps and button presses
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();
