//! Configuration type definitions

use crate::units::Velocity;

/// Velocity ramp parameters
///
/// The ramp is a fixed step-rate change per fixed wall-clock tick rather than
/// a physical acceleration, so every tick costs one add and one divide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampConfig {
    /// Milliseconds between ramp ticks
    pub interval_ms: u32,
    /// Steps/sec added per tick while speeding up
    pub accel_steps: u32,
    /// Steps/sec removed per tick while slowing to a lower setpoint or stopping
    pub decel_steps: u32,
    /// Steps/sec removed per tick on a fast stop
    pub fast_decel_steps: u32,
    /// Stops that begin above this speed use `fast_decel_steps`
    pub fast_stop_above: Velocity,
}

impl RampConfig {
    /// Reference machine ramp: 20 steps/sec every 10 ms
    pub const DEFAULT: Self = Self {
        interval_ms: 10,
        accel_steps: 20,
        decel_steps: 20,
        fast_decel_steps: 40,
        fast_stop_above: Velocity::from_units(18),
    };
}

impl Default for RampConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Switch filtering parameters
///
/// Toggle switches and momentary buttons bounce differently, hence two delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Debounce delay for the direction toggle switch (ms)
    pub toggle_ms: u32,
    /// Debounce delay for momentary buttons (ms)
    pub momentary_ms: u32,
    /// Minimum delay between input samples (ms)
    pub read_interval_ms: u32,
}

impl DebounceConfig {
    /// Reference machine switch timing
    pub const DEFAULT: Self = Self {
        toggle_ms: 50,
        momentary_ms: 25,
        read_interval_ms: 50,
    };
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete power feed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedConfig {
    /// Rapid speed and upper bound for the operator setpoint
    pub max_velocity: Velocity,
    /// Lowest speed the motor starts at with usable torque
    pub min_velocity: Velocity,
    /// Setpoint change per encoder detent
    pub velocity_increment: Velocity,
    /// Driver steps per motor revolution (full steps x microsteps)
    pub steps_per_rev: u32,
    /// Motor revolutions per unit of table travel
    pub revs_per_unit: u32,
    /// Ramp parameters
    pub ramp: RampConfig,
    /// Step pulse high time in microseconds
    pub pulse_width_us: u32,
    /// Width of the single noise-reduction pulse at boot (ms)
    pub startup_click_ms: u32,
    /// Switch filtering
    pub debounce: DebounceConfig,
    /// Quadrature transitions per encoder detent
    pub encoder_steps_per_detent: u8,
    /// Driver enable input is active-low
    pub enable_active_low: bool,
    /// Swap the direction output level
    pub invert_direction: bool,
}

impl FeedConfig {
    /// Reference machine: half-stepping through a 2:1 pulley onto a 10 tpi
    /// leadscrew, 36 in/min rapid
    pub const DEFAULT: Self = Self {
        max_velocity: Velocity::from_units(36),
        min_velocity: Velocity::from_hundredths(10),
        velocity_increment: Velocity::from_hundredths(25),
        steps_per_rev: 400,
        revs_per_unit: 20,
        ramp: RampConfig::DEFAULT,
        pulse_width_us: 50,
        startup_click_ms: 5,
        debounce: DebounceConfig::DEFAULT,
        encoder_steps_per_detent: 4,
        enable_active_low: true,
        invert_direction: false,
    };

    /// Driver steps per unit of travel
    pub const fn steps_per_unit(&self) -> u32 {
        self.steps_per_rev.saturating_mul(self.revs_per_unit)
    }

    /// Step rate for a feed velocity
    pub const fn steps_per_sec(&self, velocity: Velocity) -> u32 {
        velocity.to_steps_per_sec(self.steps_per_unit())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratio() {
        let config = FeedConfig::DEFAULT;
        assert_eq!(config.steps_per_unit(), 8000);
        assert_eq!(config.steps_per_sec(config.max_velocity), 4800);
    }

    #[test]
    fn test_struct_update_override() {
        let config = FeedConfig {
            max_velocity: Velocity::from_units(35),
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.steps_per_sec(config.max_velocity), 4667);
        assert_eq!(config.ramp, RampConfig::DEFAULT);
    }
}
