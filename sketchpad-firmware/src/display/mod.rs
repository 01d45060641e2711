//! Panel drivers implementing the core Display capability

pub mod ssd1306;

pub use ssd1306::Ssd1306;
