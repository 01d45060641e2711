//! Input events produced by the decoders

/// Encoder index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    One,
    Two,
}

impl AxisId {
    /// Slot in per-axis arrays
    pub const fn index(self) -> usize {
        match self {
            AxisId::One => 0,
            AxisId::Two => 1,
        }
    }
}

/// Button index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Encoder 1 push switch, rolls drawing back
    One,
    /// Encoder 2 push switch, replays undone drawing
    Two,
}

/// Decoded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// One detent on an encoder, `step` is +1 or -1
    Step { axis: AxisId, step: i8 },
    /// Button fired (press or hold repeat)
    Button(ButtonId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index() {
        assert_eq!(AxisId::One.index(), 0);
        assert_eq!(AxisId::Two.index(), 1);
    }
}
