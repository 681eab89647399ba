//! Interval gating on free-running counters

use millfeed_hal::time::elapsed;

/// Fixed-interval gate on a wrapping `u32` clock
///
/// [`due`](Self::due) returns true once at least `interval` has elapsed since
/// the previous firing. The reference point advances by exactly one interval
/// to keep a steady cadence, unless the caller has fallen more than one full
/// interval behind; then it resynchronises to `now` so a long pause is not
/// followed by a burst of catch-up firings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    last: u32,
}

impl IntervalTimer {
    /// Timer whose reference point is `now`
    pub const fn new(now: u32) -> Self {
        Self { last: now }
    }

    /// Check whether the interval has elapsed, consuming it if so
    pub fn due(&mut self, now: u32, interval: u32) -> bool {
        let since = elapsed(now, self.last);
        if since < interval {
            return false;
        }

        if since >= interval.saturating_mul(2) {
            self.last = now;
        } else {
            self.last = self.last.wrapping_add(interval);
        }
        true
    }

    /// Move the reference point to `now`
    pub fn reset(&mut self, now: u32) {
        self.last = now;
    }

    /// Reference point of the last firing
    pub fn last(&self) -> u32 {
        self.last
    }
}
