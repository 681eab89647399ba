//! Shared feed context
//!
//! Replaces process-wide globals (configuration, the encoder setpoint) with
//! one value owned by the motion engine. Controllers reach it only through
//! the engine, so every field keeps a single writer.

use crate::config::{FeedConfig, MotionLimits};
use crate::setpoint::SetpointCell;
use crate::units::Velocity;

/// Configuration, derived limits, and the operator setpoint
#[derive(Debug, Clone, Copy)]
pub struct FeedContext<'a> {
    config: FeedConfig,
    limits: MotionLimits,
    setpoint: &'a SetpointCell,
}

impl<'a> FeedContext<'a> {
    /// Bundle a configuration with the setpoint written by the encoder
    pub const fn new(config: FeedConfig, setpoint: &'a SetpointCell) -> Self {
        Self {
            limits: MotionLimits::from_config(&config),
            config,
            setpoint,
        }
    }

    /// Build-time configuration
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Derived step-rate limits
    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    /// Velocity currently selected by the operator
    pub fn operator_velocity(&self) -> Velocity {
        self.setpoint.get()
    }

    /// Step rate for a velocity, clamped to the maximum
    pub fn steps_per_sec(&self, velocity: Velocity) -> u32 {
        self.config
            .steps_per_sec(velocity)
            .min(self.limits.max_steps_per_sec)
    }
}
