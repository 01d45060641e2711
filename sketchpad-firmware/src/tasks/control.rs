//! Control task
//!
//! Owns the engine and the display. Waits for input or the idle timeout,
//! drains everything queued, and runs one scheduler cycle.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;

use sketchpad_core::canvas::Engine;
use sketchpad_core::config::SketchConfig;
use sketchpad_core::scheduler::RenderScheduler;
use sketchpad_core::traits::DisplayError;
use sketchpad_hal::Clock;

use crate::board::BoardClock;
use crate::channels::INPUT_CHANNEL;
use crate::display::Ssd1306;

/// Panel type driven by this board
pub type OledDisplay = Ssd1306<I2c<'static, I2C1, Blocking>>;

/// Control task - single consumer of input events
#[embassy_executor::task]
pub async fn control_task(
    engine: &'static mut Engine,
    mut display: OledDisplay,
    config: SketchConfig,
) {
    info!("Control task started");

    let clock = BoardClock;
    let mut scheduler = RenderScheduler::new(&config);
    let idle_ms = config.timing.idle_sleep_ms.max(1) as u64;
    // Failed flushes retry every cycle; report each outage once
    let mut flush_error: Option<DisplayError> = None;

    loop {
        match select(INPUT_CHANNEL.receive(), Timer::after_millis(idle_ms)).await {
            Either::First(event) => scheduler.push(event),
            Either::Second(()) => {}
        }
        while let Ok(event) = INPUT_CHANNEL.try_receive() {
            scheduler.push(event);
        }
        if !scheduler.has_pending() && !engine.is_dirty() {
            continue;
        }

        match scheduler.run_cycle(engine, &mut display, clock.now()) {
            Ok(report) => {
                if flush_error.take().is_some() {
                    info!("Display flush recovered");
                }
                if report.undone > 0 || report.redone > 0 {
                    let cursor = engine.cursor();
                    debug!(
                        "Undo x{} redo x{}: {} points at {} ms, cursor ({}, {}), redo depth {}",
                        report.undone,
                        report.redone,
                        engine.history().len(),
                        engine.draw_time(),
                        cursor.x,
                        cursor.y,
                        engine.redo_depth()
                    );
                }
                if report.had_input() || report.presented {
                    trace!("Cycle: {:?}", report);
                }
            }
            Err(e) => {
                if flush_error.replace(e) != Some(e) {
                    warn!("Display flush failed: {:?}", e);
                }
            }
        }
    }
}
