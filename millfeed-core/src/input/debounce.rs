//! Debounced digital inputs

use millfeed_hal::gpio::{InputPin, Level};
use millfeed_hal::time::elapsed;

use crate::motion::IntervalTimer;

/// Change of the debounced level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input became active (pressed / thrown)
    Activated,
    /// Input returned to idle
    Deactivated,
}

/// Electrical level that means "active"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pulled up, switch closes to ground
    #[default]
    ActiveLow,
    /// Pulled down, switch closes to supply
    ActiveHigh,
}

impl Polarity {
    /// Check whether a line level means "active"
    pub const fn is_active(self, level: Level) -> bool {
        match self {
            Polarity::ActiveLow => !level.is_high(),
            Polarity::ActiveHigh => level.is_high(),
        }
    }
}

/// Debounce filter over sampled levels
///
/// The stable level only follows the raw level after the raw level has been
/// sampled unchanged for at least `debounce_ms`. Each stable change is
/// reported exactly once; a raw change that reverts sooner is never reported.
#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_ms: u32,
    last_raw: bool,
    stable: bool,
    last_change_ms: u32,
}

impl Debouncer {
    /// Filter whose raw and stable levels both start at `initial`
    pub const fn new(debounce_ms: u32, initial: bool) -> Self {
        Self {
            debounce_ms,
            last_raw: initial,
            stable: initial,
            last_change_ms: 0,
        }
    }

    /// Feed one sample taken at `now_ms`
    pub fn update(&mut self, now_ms: u32, active: bool) -> Option<Edge> {
        if active != self.last_raw {
            // Bouncing (or a real change): restart the timer
            self.last_change_ms = now_ms;
            self.last_raw = active;
        }

        if active != self.stable && elapsed(now_ms, self.last_change_ms) >= self.debounce_ms {
            self.stable = active;
            return Some(if active {
                Edge::Activated
            } else {
                Edge::Deactivated
            });
        }

        None
    }

    /// Debounced level
    pub fn is_active(&self) -> bool {
        self.stable
    }
}

/// Input pin behind a rate-limited debounce filter
///
/// Sampling is limited to once per `read_interval_ms`; reading a mechanical
/// switch on every loop pass only steals time from the step generator.
#[derive(Debug)]
pub struct DebouncedInput<P> {
    pin: P,
    polarity: Polarity,
    filter: Debouncer,
    read_timer: IntervalTimer,
    read_interval_ms: u32,
}

impl<P: InputPin> DebouncedInput<P> {
    /// Wrap a pin; the debounced level starts inactive
    pub fn new(pin: P, polarity: Polarity, debounce_ms: u32, read_interval_ms: u32) -> Self {
        Self {
            pin,
            polarity,
            filter: Debouncer::new(debounce_ms, false),
            read_timer: IntervalTimer::new(0),
            read_interval_ms,
        }
    }

    /// Sample the pin if the read interval has elapsed
    ///
    /// Returns the debounced edge, if this sample completed one.
    pub fn poll(&mut self, now_ms: u32) -> Option<Edge> {
        if !self.read_timer.due(now_ms, self.read_interval_ms) {
            return None;
        }
        let active = self.read_raw();
        self.filter.update(now_ms, active)
    }

    /// Unfiltered, unthrottled read of the line
    pub fn read_raw(&self) -> bool {
        self.polarity.is_active(self.pin.level())
    }

    /// Debounced level
    pub fn is_active(&self) -> bool {
        self.filter.is_active()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use millfeed_hal::mock::PinProbe;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn test_polarity() {
        assert!(Polarity::ActiveLow.is_active(Level::Low));
        assert!(!Polarity::ActiveLow.is_active(Level::High));
        assert!(Polarity::ActiveHigh.is_active(Level::High));
    }

    #[test]
    fn test_stable_change_reported_once() {
        let mut filter = Debouncer::new(25, false);
        assert_eq!(filter.update(100, true), None);
        assert_eq!(filter.update(110, true), None);
        assert_eq!(filter.update(125, true), Some(Edge::Activated));
        assert!(filter.is_active());
        assert_eq!(filter.update(200, true), None);
        assert_eq!(filter.update(300, false), None);
        assert_eq!(filter.update(325, false), Some(Edge::Deactivated));
    }

    #[test]
    fn test_glitch_rejected() {
        let mut filter = Debouncer::new(25, false);
        assert_eq!(filter.update(100, true), None);
        assert_eq!(filter.update(110, false), None);
        assert_eq!(filter.update(200, false), None);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_bounce_restarts_timer() {
        let mut filter = Debouncer::new(50, false);
        filter.update(0, true);
        filter.update(30, false);
        filter.update(40, true);
        // 50ms after the first change, but only 20ms after the last bounce
        assert_eq!(filter.update(60, true), None);
        assert_eq!(filter.update(90, true), Some(Edge::Activated));
    }

    #[test]
    fn test_input_read_rate_limited() {
        let probe = PinProbe::new(true);
        let mut input = DebouncedInput::new(&probe, Polarity::ActiveLow, 50, 50);

        assert_eq!(input.poll(1000), None);
        assert_eq!(probe.reads(), 1);
        assert_eq!(input.poll(1010), None);
        assert_eq!(probe.reads(), 1);

        probe.set(false);
        assert_eq!(input.poll(1050), None);
        assert_eq!(input.poll(1100), Some(Edge::Activated));
        assert!(input.is_active());
        assert!(input.read_raw());
    }

    /// Sample the filter once per millisecond over a sequence of
    /// `(level, duration_ms)` segments and collect its edges
    fn run_segments(debounce_ms: u32, segments: &[(bool, u32)]) -> Vec<Edge> {
        let mut filter = Debouncer::new(debounce_ms, false);
        let mut now = 1_000u32;
        let mut edges = Vec::new();
        for &(level, duration) in segments {
            for _ in 0..duration {
                if let Some(edge) = filter.update(now, level) {
                    edges.push(edge);
                }
                now += 1;
            }
        }
        edges
    }

    /// Reference model: a run of samples at a level different from the
    /// stable level is accepted iff it spans at least `debounce_ms`
    fn expected_edges(debounce_ms: u32, segments: &[(bool, u32)]) -> Vec<Edge> {
        // Merge adjacent segments at the same level into runs
        let mut runs: Vec<(bool, u32)> = Vec::new();
        for &(level, duration) in segments {
            if duration == 0 {
                continue;
            }
            match runs.last_mut() {
                Some((last, len)) if *last == level => *len += duration,
                _ => runs.push((level, duration)),
            }
        }

        let mut stable = false;
        let mut edges = Vec::new();
        for (level, len) in runs {
            // Samples at t0 .. t0 + len - 1; accepted at t0 + debounce_ms
            if level != stable && len > debounce_ms {
                stable = level;
                edges.push(if level {
                    Edge::Activated
                } else {
                    Edge::Deactivated
                });
            }
        }
        edges
    }

    proptest! {
        #[test]
        fn prop_edge_iff_level_held(
            debounce_ms in 1u32..60,
            segments in proptest::collection::vec((any::<bool>(), 0u32..120), 0..24),
        ) {
            prop_assert_eq!(
                run_segments(debounce_ms, &segments),
                expected_edges(debounce_ms, &segments)
            );
        }
    }
}
