//! Configuration type definitions

/// Default time-windowed undo threshold
pub const DEFAULT_UNDO_WINDOW_MS: u32 = 2000;

/// Per-call cap on draw-clock advance, so idle time never counts as drawing
pub const MAX_MOVE_GAP_MS: u32 = 150;

/// Minimum gap between two edge-mode button fires
pub const DEFAULT_MIN_PRESS_GAP_MS: u32 = 200;

/// Hold-repeat delay before the first repeat
pub const DEFAULT_HOLD_DELAY_MS: u32 = 350;

/// Hold-repeat interval between repeats
pub const DEFAULT_HOLD_REPEAT_MS: u32 = 90;

/// Largest canvas the raster can hold (320 x 240 cells)
pub const MAX_CANVAS_CELLS: usize = 320 * 240;

/// Points kept in history before the oldest is committed to the base layer
pub const HISTORY_CAPACITY: usize = 2048;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Canvas width or height is zero
    ZeroCanvas,
    /// Canvas has more cells than the raster can hold
    CanvasTooLarge,
    /// Hold-repeat interval is zero
    ZeroRepeatInterval,
    /// Both encoders drive the same canvas axis
    SameAxisTwice,
}

/// Cell pattern stamped for each point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Brush {
    /// Single cell
    #[default]
    Dot,
    /// 3x3 block with the centre cleared, so the cursor stays visible
    Ring,
}

/// Undo policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UndoPolicy {
    /// Remove every point drawn within the trailing window of draw time
    TimeWindow { threshold_ms: u32 },
    /// Remove exactly the most recent point
    StepWindow,
}

impl Default for UndoPolicy {
    fn default() -> Self {
        UndoPolicy::TimeWindow {
            threshold_ms: DEFAULT_UNDO_WINDOW_MS,
        }
    }
}

/// Button firing behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMode {
    /// One fire per press, gated by a minimum gap since the previous fire
    Edge { min_gap_ms: u32 },
    /// Fire on press, then repeat while held
    HoldRepeat {
        initial_delay_ms: u32,
        repeat_ms: u32,
    },
}

impl ButtonMode {
    /// Edge mode with the default gap
    pub const fn edge() -> Self {
        ButtonMode::Edge {
            min_gap_ms: DEFAULT_MIN_PRESS_GAP_MS,
        }
    }

    /// Hold-repeat mode with the default timings
    pub const fn hold_repeat() -> Self {
        ButtonMode::HoldRepeat {
            initial_delay_ms: DEFAULT_HOLD_DELAY_MS,
            repeat_ms: DEFAULT_HOLD_REPEAT_MS,
        }
    }
}

impl Default for ButtonMode {
    fn default() -> Self {
        ButtonMode::hold_repeat()
    }
}

/// Canvas axis an encoder drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasAxis {
    X,
    Y,
}

/// Encoder mapping onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Canvas axis moved by this encoder
    pub target: CanvasAxis,
    /// Flip the decoded direction
    pub invert: bool,
}

impl AxisConfig {
    pub const fn new(target: CanvasAxis, invert: bool) -> Self {
        Self { target, invert }
    }

    /// Unit cursor delta for a decoded step of `+1` or `-1`
    pub fn delta(&self, step: i8) -> (i8, i8) {
        let signed = if self.invert { -step } else { step };
        match self.target {
            CanvasAxis::X => (signed, 0),
            CanvasAxis::Y => (0, signed),
        }
    }
}

/// Canvas geometry and brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanvasConfig {
    pub width: u16,
    pub height: u16,
    pub brush: Brush,
}

impl CanvasConfig {
    /// Centre cell, where the seed point sits
    pub const fn center(&self) -> (u16, u16) {
        (self.width / 2, self.height / 2)
    }

    /// Number of cells
    pub const fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Cap on draw-clock advance per step
    pub max_move_gap_ms: u32,
    /// Input sampling period
    pub poll_period_ms: u32,
    /// Sleep when a cycle changed nothing
    pub idle_sleep_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_move_gap_ms: MAX_MOVE_GAP_MS,
            poll_period_ms: 1,
            idle_sleep_ms: 1,
        }
    }
}

/// Complete sketch pad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SketchConfig {
    pub canvas: CanvasConfig,
    pub undo: UndoPolicy,
    pub buttons: ButtonMode,
    /// Encoder 1 and encoder 2 mapping
    pub axes: [AxisConfig; 2],
    pub timing: TimingConfig,
}

impl SketchConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::ZeroCanvas);
        }
        if self.canvas.cells() > MAX_CANVAS_CELLS {
            return Err(ConfigError::CanvasTooLarge);
        }
        if let ButtonMode::HoldRepeat { repeat_ms: 0, .. } = self.buttons {
            return Err(ConfigError::ZeroRepeatInterval);
        }
        if self.axes[0].target == self.axes[1].target {
            return Err(ConfigError::SameAxisTwice);
        }
        Ok(())
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 128,
                height: 64,
                brush: Brush::Dot,
            },
            undo: UndoPolicy::default(),
            buttons: ButtonMode::default(),
            axes: [
                AxisConfig::new(CanvasAxis::X, false),
                AxisConfig::new(CanvasAxis::Y, false),
            ],
            timing: TimingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SketchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let mut config = SketchConfig::default();
        config.canvas.height = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCanvas));
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let mut config = SketchConfig::default();
        config.canvas.width = 320;
        config.canvas.height = 320;
        assert_eq!(config.validate(), Err(ConfigError::CanvasTooLarge));
    }

    #[test]
    fn test_same_axis_rejected() {
        let mut config = SketchConfig::default();
        config.axes[1].target = CanvasAxis::X;
        assert_eq!(config.validate(), Err(ConfigError::SameAxisTwice));
    }

    #[test]
    fn test_zero_repeat_rejected() {
        let mut config = SketchConfig::default();
        config.buttons = ButtonMode::HoldRepeat {
            initial_delay_ms: 350,
            repeat_ms: 0,
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRepeatInterval));
    }

    #[test]
    fn test_axis_delta() {
        let y_inverted = AxisConfig::new(CanvasAxis::Y, true);
        assert_eq!(y_inverted.delta(1), (0, -1));
        assert_eq!(y_inverted.delta(-1), (0, 1));

        let x = AxisConfig::new(CanvasAxis::X, false);
        assert_eq!(x.delta(1), (1, 0));
    }

    #[test]
    fn test_center() {
        let canvas = CanvasConfig {
            width: 128,
            height: 32,
            brush: Brush::Ring,
        };
        assert_eq!(canvas.center(), (64, 16));
        assert_eq!(canvas.cells(), 4096);
    }
}
