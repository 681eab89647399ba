//! Host-side doubles for the HAL traits
//!
//! Only built with the `mock` feature; dependent crates enable it from their
//! `[dev-dependencies]`. All state lives in `Cell`s so a test can hand `&probe`
//! to the code under test and keep observing it afterwards.

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::gpio::{InputPin, OutputPin};
use crate::time::MonotonicClock;

/// Observable digital line
///
/// `&PinProbe` is an [`OutputPin`] (counting rising edges) and `PinProbe` is an
/// [`InputPin`] whose level the test drives with [`PinProbe::set`].
#[derive(Debug, Default)]
pub struct PinProbe {
    high: Cell<bool>,
    rising_edges: Cell<u32>,
    falling_edges: Cell<u32>,
    reads: Cell<u32>,
    /// Flip to this level once this many more reads have happened
    flip_after: Cell<Option<(u32, bool)>>,
}

impl PinProbe {
    /// New line at the given level
    pub fn new(high: bool) -> Self {
        let probe = Self::default();
        probe.high.set(high);
        probe
    }

    /// Drive the line (input side)
    pub fn set(&self, high: bool) {
        self.high.set(high);
    }

    /// Current line level
    pub fn level_high(&self) -> bool {
        self.high.get()
    }

    /// Number of low-to-high transitions written so far
    pub fn rising_edges(&self) -> u32 {
        self.rising_edges.get()
    }

    /// Number of high-to-low transitions written so far
    pub fn falling_edges(&self) -> u32 {
        self.falling_edges.get()
    }

    /// Number of times the line was read
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    /// Change the level to `high` after `reads` further reads
    ///
    /// Lets a test release a switch while the code under test busy-waits.
    pub fn flip_after_reads(&self, reads: u32, high: bool) {
        self.flip_after.set(Some((reads, high)));
    }

    fn write(&self, high: bool) {
        let was = self.high.get();
        if high && !was {
            self.rising_edges.set(self.rising_edges.get() + 1);
        } else if !high && was {
            self.falling_edges.set(self.falling_edges.get() + 1);
        }
        self.high.set(high);
    }
}

impl OutputPin for &PinProbe {
    fn set_high(&mut self) {
        self.write(true);
    }

    fn set_low(&mut self) {
        self.write(false);
    }

    fn is_set_high(&self) -> bool {
        self.high.get()
    }
}

impl InputPin for PinProbe {
    fn is_high(&self) -> bool {
        self.reads.set(self.reads.get() + 1);
        if let Some((remaining, level)) = self.flip_after.get() {
            if remaining == 0 {
                self.high.set(level);
                self.flip_after.set(None);
            } else {
                self.flip_after.set(Some((remaining - 1, level)));
            }
        }
        self.high.get()
    }
}

/// Manually advanced clock
///
/// Implements [`MonotonicClock`] and, through `&ManualClock`, [`DelayNs`]:
/// busy-waits in the code under test advance simulated time instead of
/// sleeping.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: Cell<u64>,
}

impl ManualClock {
    /// Clock starting at `micros`
    pub fn starting_at(micros: u64) -> Self {
        Self {
            micros: Cell::new(micros),
        }
    }

    /// Advance by microseconds
    pub fn advance_us(&self, us: u64) {
        self.micros.set(self.micros.get() + us);
    }

    /// Advance by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    /// Total simulated microseconds
    pub fn total_micros(&self) -> u64 {
        self.micros.get()
    }
}

impl MonotonicClock for ManualClock {
    fn now_micros(&self) -> u32 {
        self.micros.get() as u32
    }

    fn now_millis(&self) -> u32 {
        (self.micros.get() / 1000) as u32
    }
}

impl DelayNs for &ManualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance_us(u64::from(ns).div_ceil(1000));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_counts_edges() {
        let probe = PinProbe::new(false);
        let mut out = &probe;
        out.set_high();
        out.set_high();
        out.set_low();
        assert_eq!(probe.rising_edges(), 1);
        assert_eq!(probe.falling_edges(), 1);
        assert!(!probe.level_high());
    }

    #[test]
    fn test_probe_flips_after_reads() {
        let probe = PinProbe::new(false);
        probe.flip_after_reads(2, true);
        assert!(!probe.is_high());
        assert!(!probe.is_high());
        assert!(probe.is_high());
        assert_eq!(probe.reads(), 3);
    }

    #[test]
    fn test_clock_delay_advances_time() {
        let clock = ManualClock::starting_at(0);
        let mut delay = &clock;
        delay.delay_us(50);
        delay.delay_ms(2);
        assert_eq!(clock.total_micros(), 2050);
        assert_eq!(clock.now_millis(), 2);
    }
}
