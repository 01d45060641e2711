//! Button tracking
//!
//! Active-low push switches with two firing behaviours:
//!
//! - **Edge**: one fire per high-to-low transition, ignored if it comes
//!   within `min_gap_ms` of the previous fire.
//! - **Hold-repeat**: fire as soon as the line reads low, then again every
//!   `repeat_ms` once `initial_delay_ms` has passed, until release.
//!
//! All timing goes through [`Millis::diff`] so counter wraparound is safe.

use sketchpad_hal::{Level, Millis};

use crate::config::ButtonMode;

/// Per-button tracker state
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    mode: ButtonMode,
    /// Level seen on the previous sample (edge mode)
    last_level: Level,
    /// Time of the previous fire (edge mode)
    last_fire: Option<Millis>,
    /// Button is being held (hold-repeat mode)
    holding: bool,
    /// Next repeat is due at this time (hold-repeat mode)
    next_repeat: Millis,
}

impl ButtonTracker {
    /// Create a tracker seeded with the level read at startup
    pub const fn new(mode: ButtonMode, initial_level: Level) -> Self {
        Self {
            mode,
            last_level: initial_level,
            last_fire: None,
            holding: false,
            next_repeat: Millis::ZERO,
        }
    }

    /// Feed one sample; returns true if the button fires
    pub fn sample(&mut self, level: Level, now: Millis) -> bool {
        match self.mode {
            ButtonMode::Edge { min_gap_ms } => self.sample_edge(level, now, min_gap_ms),
            ButtonMode::HoldRepeat {
                initial_delay_ms,
                repeat_ms,
            } => self.sample_hold(level, now, initial_delay_ms, repeat_ms),
        }
    }

    fn sample_edge(&mut self, level: Level, now: Millis, min_gap_ms: u32) -> bool {
        let pressed = self.last_level.is_high() && level.is_low();
        self.last_level = level;

        if !pressed {
            return false;
        }

        let gap_ok = match self.last_fire {
            Some(last) => now.diff(last) > min_gap_ms as i32,
            None => true,
        };
        if gap_ok {
            self.last_fire = Some(now);
        }
        gap_ok
    }

    fn sample_hold(
        &mut self,
        level: Level,
        now: Millis,
        initial_delay_ms: u32,
        repeat_ms: u32,
    ) -> bool {
        self.last_level = level;

        if level.is_high() {
            self.holding = false;
            return false;
        }

        if !self.holding {
            self.holding = true;
            self.next_repeat = now.wrapping_add(initial_delay_ms);
            return true;
        }

        if now.reached(self.next_repeat) {
            self.next_repeat = now.wrapping_add(repeat_ms);
            return true;
        }

        false
    }
}
