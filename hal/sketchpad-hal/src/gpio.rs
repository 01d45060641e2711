//! GPIO pin abstractions
//!
//! Encoder CLK/DT lines and push buttons are plain digital inputs with
//! pull-ups, so only the read side is modelled here.

/// Sampled logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a raw bit (anything non-zero is high)
    pub const fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Check if this level is high (logic 1)
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this level is low (logic 0)
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Sample the pin as a [`Level`]
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}
