//! Sketchpad - Rotary Encoder Sketch Pad Firmware
//!
//! Main firmware binary for an RP2040 board with two push-button rotary
//! encoders and a 128x32 SSD1306 OLED on I2C1.
//!
//! Encoder 1 and encoder 2 steer the cursor; every move leaves a trail.
//! Pressing encoder 1 rolls drawing back, pressing encoder 2 replays it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sketchpad_core::canvas::Engine;
use sketchpad_core::config::{parse_config, SketchConfig, UndoPolicy, Variant};
use sketchpad_core::traits::{draw_boot_frame, Display, DisplayError};

use crate::board::{BoardPin, EncoderPins, I2C_FREQUENCY_HZ, OLED_ADDR};
use crate::display::Ssd1306;
use crate::tasks::OledDisplay;

mod board;
mod channels;
mod display;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit sketch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../sketch.toml");

/// How long the all-on flash stays lit
const FLASH_MS: u64 = 100;

/// How long the boot frame stays up before drawing starts
const BOOT_FRAME_MS: u64 = 400;

// Engine state is too large for a task future
static ENGINE: StaticCell<Engine> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sketchpad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display first, so the configuration can be checked against it
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);
    let mut display = Ssd1306::new(bus, OLED_ADDR);

    match bring_up(&mut display).await {
        Ok(()) => info!("SSD1306 initialized"),
        // Keep going: the engine stays consistent and flushes retry each cycle
        Err(e) => error!("SSD1306 bring-up failed: {:?}", e),
    }

    let config = load_config(display.dimensions());
    log_config(&config);

    // load_config only returns validated configurations
    let engine = ENGINE.init(unwrap!(Engine::new(&config)));

    let pins = EncoderPins {
        clk: [
            BoardPin(Input::new(p.PIN_2, Pull::Up)),
            BoardPin(Input::new(p.PIN_12, Pull::Up)),
        ],
        dt: [
            BoardPin(Input::new(p.PIN_3, Pull::Up)),
            BoardPin(Input::new(p.PIN_13, Pull::Up)),
        ],
        sw: [
            BoardPin(Input::new(p.PIN_4, Pull::Up)),
            BoardPin(Input::new(p.PIN_14, Pull::Up)),
        ],
    };
    info!("Encoder inputs initialized");

    spawner
        .spawn(tasks::input_task(pins, config.buttons, config.timing.poll_period_ms))
        .unwrap();
    spawner
        .spawn(tasks::control_task(engine, display, config))
        .unwrap();

    info!("All tasks spawned, sketch away");
}

/// Initialize the panel and flash the boot pattern
async fn bring_up(display: &mut OledDisplay) -> Result<(), DisplayError> {
    display.init()?;

    display.fill(true)?;
    display.present()?;
    Timer::after_millis(FLASH_MS).await;

    draw_boot_frame(display)?;
    display.present()?;
    Timer::after_millis(BOOT_FRAME_MS).await;
    Ok(())
}

/// Parse the embedded sketch.toml, falling back to the OLED preset
fn load_config(panel: (u16, u16)) -> SketchConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("sketch.toml rejected: {:?}, using OLED preset", e);
            return Variant::Oled128x32.config();
        }
    };

    let (width, height) = panel;
    if config.canvas.width > width || config.canvas.height > height {
        error!(
            "Canvas {}x{} does not fit the {}x{} panel, using OLED preset",
            config.canvas.width, config.canvas.height, width, height
        );
        return Variant::Oled128x32.config();
    }

    config
}

fn log_config(config: &SketchConfig) {
    debug!(
        "Canvas {}x{}, brush {:?}, buttons {:?}",
        config.canvas.width, config.canvas.height, config.canvas.brush, config.buttons
    );
    match config.undo {
        UndoPolicy::TimeWindow { threshold_ms } => {
            debug!("Undo: last {} ms of drawing per press", threshold_ms)
        }
        UndoPolicy::StepWindow => debug!("Undo: one point per press"),
    }
    debug!(
        "Axis 1 -> {:?} (invert={}), axis 2 -> {:?} (invert={})",
        config.axes[0].target, config.axes[0].invert, config.axes[1].target, config.axes[1].invert
    );
}
