//! Rotary Encoder Decoder
//!
//! Decodes quadrature CLK/DT signals into signed unit steps, one per detent.
//!
//! A step is emitted only on a falling CLK edge; the DT level at that
//! instant gives the direction. Rising edges emit nothing, so a full
//! detent cycle is counted once. There is no software debounce on these
//! lines; the pull-ups are relied on to keep CLK clean.

use sketchpad_hal::Level;

/// Decode one CLK sample against the previous one
///
/// Returns `+1` when DT is high on a falling CLK edge, `-1` when DT is low,
/// and `None` for every other transition.
pub fn decode_edge(last_clk: Level, current_clk: Level, dt: Level) -> Option<i8> {
    match (last_clk, current_clk) {
        (Level::High, Level::Low) => Some(if dt.is_high() { 1 } else { -1 }),
        _ => None,
    }
}

/// Per-axis quadrature decoder
///
/// Each encoder owns its own decoder; axes never interact.
#[derive(Debug, Clone)]
pub struct AxisDecoder {
    last_clk: Level,
}

impl AxisDecoder {
    /// Create a decoder seeded with the CLK level read at startup
    pub const fn new(initial_clk: Level) -> Self {
        Self {
            last_clk: initial_clk,
        }
    }

    /// Feed one CLK/DT sample
    ///
    /// Returns the decoded step, if this sample completes a detent.
    pub fn sample(&mut self, clk: Level, dt: Level) -> Option<i8> {
        let step = decode_edge(self.last_clk, clk, dt);
        self.last_clk = clk;
        step
    }

    /// CLK level from the previous sample
    pub fn last_clk(&self) -> Level {
        self.last_clk
    }
}
