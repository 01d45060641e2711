//! Input front end
//!
//! Samples both encoders and both buttons once per poll, in the fixed order
//! axis 1, axis 2, button 1, button 2, and returns the decoded events in
//! that order.

use heapless::Vec;
use sketchpad_hal::{Level, Millis};

use super::button::ButtonTracker;
use super::events::{AxisId, ButtonId, InputEvent};
use super::quadrature::AxisDecoder;
use crate::config::ButtonMode;

/// At most one event per input per sample
pub const MAX_EVENTS_PER_SAMPLE: usize = 4;

/// One snapshot of every input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLevels {
    /// CLK and DT for encoder 1 and encoder 2
    pub clk: [Level; 2],
    pub dt: [Level; 2],
    /// Push switches, active low
    pub buttons: [Level; 2],
}

impl InputLevels {
    /// Idle lines: everything pulled up
    pub const IDLE: InputLevels = InputLevels {
        clk: [Level::High; 2],
        dt: [Level::High; 2],
        buttons: [Level::High; 2],
    };
}

/// Decoder and tracker state for all four inputs
#[derive(Debug, Clone)]
pub struct InputFrontEnd {
    axes: [AxisDecoder; 2],
    buttons: [ButtonTracker; 2],
}

impl InputFrontEnd {
    /// Create the front end from the levels read at startup
    pub fn new(mode: ButtonMode, initial: InputLevels) -> Self {
        Self {
            axes: [
                AxisDecoder::new(initial.clk[0]),
                AxisDecoder::new(initial.clk[1]),
            ],
            buttons: [
                ButtonTracker::new(mode, initial.buttons[0]),
                ButtonTracker::new(mode, initial.buttons[1]),
            ],
        }
    }

    /// Sample every input once
    pub fn sample(
        &mut self,
        levels: &InputLevels,
        now: Millis,
    ) -> Vec<InputEvent, MAX_EVENTS_PER_SAMPLE> {
        let mut events = Vec::new();

        for (axis, id) in [AxisId::One, AxisId::Two].into_iter().enumerate() {
            if let Some(step) = self.axes[axis].sample(levels.clk[axis], levels.dt[axis]) {
                // Capacity covers one event per input
                let _ = events.push(InputEvent::Step { axis: id, step });
            }
        }

        for (button, id) in [ButtonId::One, ButtonId::Two].into_iter().enumerate() {
            if self.buttons[button].sample(levels.buttons[button], now) {
                let _ = events.push(InputEvent::Button(id));
            }
        }

        events
    }
}
