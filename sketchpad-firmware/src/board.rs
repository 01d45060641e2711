//! Board wiring
//!
//! Pin assignments for the RP2040 sketch pad and the glue that exposes
//! embassy-rp pins and time to the core as HAL capabilities.

use embassy_rp::gpio::Input;
use embassy_time::Instant;

use sketchpad_core::input::InputLevels;
use sketchpad_hal::{Clock, InputPin, Millis};

/// I2C address of the SSD1306 panel
pub const OLED_ADDR: u8 = 0x3C;

/// I2C bus speed for the panel (I2C1, SCL=GPIO7, SDA=GPIO6)
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// GPIO input exposed as a HAL pin
pub struct BoardPin(pub Input<'static>);

impl InputPin for BoardPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Both encoders with their push switches
///
/// Encoder 1: CLK=GPIO2, DT=GPIO3, SW=GPIO4
/// Encoder 2: CLK=GPIO12, DT=GPIO13, SW=GPIO14
pub struct EncoderPins {
    pub clk: [BoardPin; 2],
    pub dt: [BoardPin; 2],
    pub sw: [BoardPin; 2],
}

impl EncoderPins {
    /// Read every line once, encoders first
    pub fn read(&self) -> InputLevels {
        InputLevels {
            clk: [self.clk[0].level(), self.clk[1].level()],
            dt: [self.dt[0].level(), self.dt[1].level()],
            buttons: [self.sw[0].level(), self.sw[1].level()],
        }
    }
}

/// Millisecond clock backed by the embassy time driver
///
/// Truncated to 32 bits, so it wraps about every 49.7 days.
#[derive(Clone, Copy)]
pub struct BoardClock;

impl Clock for BoardClock {
    fn now(&self) -> Millis {
        Millis::from_raw(Instant::now().as_millis() as u32)
    }
}
