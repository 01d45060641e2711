//! Input decoding
//!
//! Turns raw pin levels into exactly-once step and button events.

pub mod button;
pub mod events;
pub mod front_end;
pub mod quadrature;

pub use button::ButtonTracker;
pub use events::{AxisId, ButtonId, InputEvent};
pub use front_end::{InputFrontEnd, InputLevels, MAX_EVENTS_PER_SAMPLE};
pub use quadrature::{decode_edge, AxisDecoder};
