//! Velocity units and step-rate conversion
//!
//! Operator-facing speeds are feed rates in distance units per minute
//! (inches per minute on the reference machine). Internally they are kept as
//! integer hundredths so a value fits in one machine word and can be shared
//! with interrupt context through a single atomic.

use core::fmt;

/// Microseconds per second
pub const MICROS_PER_SEC: u32 = 1_000_000;

/// Seconds per minute
pub const SECS_PER_MIN: u32 = 60;

/// Feed rate in hundredths of a distance unit per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Velocity(u32);

impl Velocity {
    /// Standstill
    pub const ZERO: Velocity = Velocity(0);

    /// Create from hundredths of a unit per minute (`1225` = 12.25)
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Create from whole units per minute
    pub const fn from_units(units: u32) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Raw value in hundredths
    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Whole-unit part
    pub const fn whole(self) -> u32 {
        self.0 / 100
    }

    /// Fractional part in hundredths (0-99)
    pub const fn fraction(self) -> u32 {
        self.0 % 100
    }

    /// Check for standstill
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add, saturating at `u32::MAX` hundredths
    pub const fn saturating_add(self, other: Velocity) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract, saturating at zero
    pub const fn saturating_sub(self, other: Velocity) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Convert to step pulses per second, rounded to nearest
    ///
    /// `steps_per_unit` is the number of driver steps per unit of travel.
    pub const fn to_steps_per_sec(self, steps_per_unit: u32) -> u32 {
        let denom = 100 * SECS_PER_MIN as u64;
        let steps = (self.0 as u64 * steps_per_unit as u64 + denom / 2) / denom;
        if steps > u32::MAX as u64 {
            u32::MAX
        } else {
            steps as u32
        }
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.whole(), self.fraction())
    }
}

/// Interval between pulses for a step rate, or `None` at standstill
pub const fn micros_per_step(steps_per_sec: u32) -> Option<u32> {
    if steps_per_sec == 0 {
        None
    } else {
        Some(MICROS_PER_SEC / steps_per_sec)
    }
}
