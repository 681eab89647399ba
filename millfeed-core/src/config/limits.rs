//! Derived motion limits and configuration validation

use crate::units::{micros_per_step, MICROS_PER_SEC};

use super::types::FeedConfig;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Steps per revolution or revolutions per unit is zero
    ZeroMechanicalRatio,
    /// Maximum velocity converts to zero steps/sec
    ZeroMaxVelocity,
    /// Starting velocity is above the maximum
    MinAboveMax,
    /// Ramp tick interval is zero
    ZeroRampInterval,
    /// An acceleration or deceleration rate is zero
    ZeroRampRate,
    /// Step pulse does not fit inside the shortest step interval
    PulseWidthTooLong,
    /// Encoder steps per detent is zero
    ZeroDetentSteps,
}

/// Step-rate bounds derived from a [`FeedConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionLimits {
    /// Hard upper bound on the step rate
    pub max_steps_per_sec: u32,
    /// Torque-safe starting step rate (at least 1)
    pub starting_steps_per_sec: u32,
    /// Shortest allowed pulse interval; computed intervals are clamped up to it
    pub min_micros_per_step: u32,
    /// Interval used whenever the step rate is zero
    pub idle_micros_per_step: u32,
    /// Stops beginning above this rate use the fast deceleration
    pub fast_stop_steps_per_sec: u32,
}

impl MotionLimits {
    /// Derive limits from a configuration
    ///
    /// Never divides by zero; an invalid configuration yields degenerate but
    /// finite limits. Use [`FeedConfig::validate`] to reject those.
    pub const fn from_config(config: &FeedConfig) -> Self {
        let max = config.steps_per_sec(config.max_velocity);
        let max = if max == 0 { 1 } else { max };
        let starting = config.steps_per_sec(config.min_velocity);
        let starting = if starting == 0 { 1 } else { starting };
        let starting = if starting > max { max } else { starting };

        let min_micros = match micros_per_step(max) {
            Some(us) => us,
            None => MICROS_PER_SEC,
        };
        let idle_micros = match micros_per_step(starting) {
            Some(us) => us,
            None => MICROS_PER_SEC,
        };

        Self {
            max_steps_per_sec: max,
            starting_steps_per_sec: starting,
            min_micros_per_step: min_micros,
            idle_micros_per_step: idle_micros,
            fast_stop_steps_per_sec: config.steps_per_sec(config.ramp.fast_stop_above),
        }
    }
}

impl FeedConfig {
    /// Derived step-rate limits
    pub const fn limits(&self) -> MotionLimits {
        MotionLimits::from_config(self)
    }

    /// Check the configuration for values the motion engine cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_rev == 0 || self.revs_per_unit == 0 {
            return Err(ConfigError::ZeroMechanicalRatio);
        }
        if self.steps_per_sec(self.max_velocity) == 0 {
            return Err(ConfigError::ZeroMaxVelocity);
        }
        if self.min_velocity > self.max_velocity {
            return Err(ConfigError::MinAboveMax);
        }
        if self.ramp.interval_ms == 0 {
            return Err(ConfigError::ZeroRampInterval);
        }
        if self.ramp.accel_steps == 0
            || self.ramp.decel_steps == 0
            || self.ramp.fast_decel_steps == 0
        {
            return Err(ConfigError::ZeroRampRate);
        }
        if self.pulse_width_us >= self.limits().min_micros_per_step {
            return Err(ConfigError::PulseWidthTooLong);
        }
        if self.encoder_steps_per_detent == 0 {
            return Err(ConfigError::ZeroDetentSteps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampConfig;
    use crate::units::Velocity;

    #[test]
    fn test_default_limits() {
        let limits = FeedConfig::DEFAULT.limits();
        assert_eq!(limits.max_steps_per_sec, 4800);
        assert_eq!(limits.starting_steps_per_sec, 13);
        assert_eq!(limits.min_micros_per_step, 208);
        assert_eq!(limits.idle_micros_per_step, 76_923);
        assert_eq!(limits.fast_stop_steps_per_sec, 2400);
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FeedConfig::DEFAULT.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_ratio() {
        let config = FeedConfig {
            revs_per_unit: 0,
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMechanicalRatio));
        // Limits stay finite even for a broken config
        assert_eq!(config.limits().max_steps_per_sec, 1);
    }

    #[test]
    fn test_rejects_min_above_max() {
        let config = FeedConfig {
            min_velocity: Velocity::from_units(40),
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::MinAboveMax));
    }

    #[test]
    fn test_rejects_zero_ramp() {
        let config = FeedConfig {
            ramp: RampConfig {
                decel_steps: 0,
                ..RampConfig::DEFAULT
            },
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRampRate));

        let config = FeedConfig {
            ramp: RampConfig {
                interval_ms: 0,
                ..RampConfig::DEFAULT
            },
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRampInterval));
    }

    #[test]
    fn test_rejects_long_pulse() {
        let config = FeedConfig {
            pulse_width_us: 250,
            ..FeedConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::PulseWidthTooLong));
    }
}
