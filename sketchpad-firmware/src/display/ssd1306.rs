//! SSD1306 OLED Display Driver
//!
//! Driver for 128x32 SSD1306-based OLED displays via blocking I2C.
//! Pixels land in a page-ordered frame buffer; `present` pushes the whole
//! buffer to the panel.

use embedded_hal::i2c::{ErrorKind, I2c};
use sketchpad_core::traits::{Display, DisplayError};

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 32;
const PAGES: usize = HEIGHT / 8;

/// Data bytes per I2C transfer
const CHUNK: usize = 16;

/// Control bytes
const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    addr: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x02, // Sequential COM config for 32 rows
            cmd::SET_CONTRAST,
            0x8F,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DEACTIVATE_SCROLL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.addr, &[CONTROL_CMD, cmd])
            .map_err(map_i2c_error)
    }
}

impl<I2C: I2c> Display for Ssd1306<I2C> {
    fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return Err(DisplayError::OutOfBounds);
        }

        let bit = 1u8 << (y % 8);
        let byte = &mut self.buffer[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        Ok(())
    }

    fn fill(&mut self, on: bool) -> Result<(), DisplayError> {
        let value = if on { 0xFF } else { 0x00 };
        for page in self.buffer.iter_mut() {
            page.fill(value);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        // Reset the write window to the whole panel
        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c)?;
        }

        let mut data = [0u8; CHUNK + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            for chunk in self.buffer[page].chunks(CHUNK) {
                data[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c
                    .write(self.addr, &data[..=chunk.len()])
                    .map_err(map_i2c_error)?;
            }
        }

        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}

fn map_i2c_error<E: embedded_hal::i2c::Error>(e: E) -> DisplayError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => DisplayError::NotResponding,
        _ => DisplayError::Bus,
    }
}
