//! Millisecond clock abstraction
//!
//! The underlying hardware timer wraps, so timestamps are only ever compared
//! through [`Millis::diff`]. Raw subtraction of two readings is never valid.

/// Wrapping millisecond timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(u32);

impl Millis {
    /// Timestamp zero
    pub const ZERO: Millis = Millis(0);

    /// Wrap a raw counter reading
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Timestamp `ms` milliseconds after this one, wrapping on overflow
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Signed distance from `earlier` to `self`
    ///
    /// Correct across counter wraparound as long as the two readings are
    /// less than 2^31 ms apart. Negative when `self` precedes `earlier`.
    pub const fn diff(self, earlier: Millis) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }

    /// Check whether `self` is at or after `deadline`
    pub const fn reached(self, deadline: Millis) -> bool {
        self.diff(deadline) >= 0
    }
}

/// Monotonic millisecond counter
pub trait Clock {
    /// Current counter reading
    fn now(&self) -> Millis;
}
