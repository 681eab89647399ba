//! Monotonic time sources
//!
//! The feed loop never sleeps; every periodic action is gated by comparing a
//! free-running counter against a stored sample. Counters are 32 bits wide and
//! wrap (microseconds after ~71 minutes, milliseconds after ~49 days), so
//! elapsed time must always be computed with [`elapsed`].

/// Free-running clock with microsecond and millisecond views
///
/// Both counters start at an arbitrary value and wrap at `u32::MAX`.
pub trait MonotonicClock {
    /// Current time in microseconds
    fn now_micros(&self) -> u32;

    /// Current time in milliseconds
    fn now_millis(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }

    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// Time elapsed from `since` to `now`, correct across counter wraparound
#[inline]
pub const fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
