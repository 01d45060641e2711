//! Input capture task
//!
//! Polls both encoders and both push switches at a fixed period and
//! forwards decoded events to the control task. Never touches the display.

use defmt::*;
use embassy_time::{Duration, Ticker};

use sketchpad_core::config::ButtonMode;
use sketchpad_core::input::InputFrontEnd;
use sketchpad_hal::Clock;

use crate::board::{BoardClock, EncoderPins};
use crate::channels::INPUT_CHANNEL;

/// Input task - samples every line once per poll period
#[embassy_executor::task]
pub async fn input_task(pins: EncoderPins, mode: ButtonMode, poll_period_ms: u32) {
    info!("Input task started ({} ms poll)", poll_period_ms);

    let clock = BoardClock;
    let mut front_end = InputFrontEnd::new(mode, pins.read());
    let mut ticker = Ticker::every(Duration::from_millis(poll_period_ms.max(1) as u64));

    loop {
        ticker.next().await;

        let levels = pins.read();
        for event in front_end.sample(&levels, clock.now()) {
            if INPUT_CHANNEL.try_send(event).is_err() {
                warn!("Input queue full, dropped {:?}", event);
            }
        }
    }
}
