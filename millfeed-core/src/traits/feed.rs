//! Feed motor trait
//!
//! Implemented by the step engine; the direction and override controllers
//! are written against it.

use crate::units::Velocity;

/// Direction of table travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedDirection {
    /// Table moves left
    Left,
    /// Table moves right (direction output idle level)
    #[default]
    Right,
}

/// Progress of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopStatus {
    /// Still slowing down
    Decelerating,
    /// Reached standstill on this call; the driver was just disabled
    ///
    /// Reported exactly once per stop. `pause_cleared` is set when a pending
    /// pause was dropped and the operator setpoint restored.
    CameToRest {
        /// A pause was active and has been cleared
        pause_cleared: bool,
    },
    /// Already at rest; nothing happened
    Idle,
}

/// Single-axis feed motor
///
/// `run()` and `stop()` are meant to be called on every pass of the polling
/// loop: each call performs at most one ramp tick and one pulse.
pub trait FeedDrive {
    /// Command a new feed velocity (clears any pause)
    ///
    /// Takes effect over subsequent ramp ticks, not immediately.
    fn set_speed(&mut self, velocity: Velocity);

    /// Command zero velocity and mark the feed paused
    fn pause(&mut self);

    /// Check whether a pause is in effect
    fn is_paused(&self) -> bool;

    /// Velocity currently commanded (zero while paused)
    fn commanded_velocity(&self) -> Velocity;

    /// Velocity last selected by the operator
    fn operator_velocity(&self) -> Velocity;

    /// Configured maximum (rapid) velocity
    fn max_velocity(&self) -> Velocity;

    /// Set the direction output
    fn set_direction(&mut self, direction: FeedDirection);

    /// Direction currently on the direction output
    fn direction(&self) -> FeedDirection;

    /// Check whether the motor is still stepping
    fn is_moving(&self) -> bool;

    /// Drive toward the commanded velocity
    fn run(&mut self);

    /// Ramp down to a standstill and release the driver
    fn stop(&mut self, fast: bool) -> StopStatus;
}

impl<T: FeedDrive + ?Sized> FeedDrive for &mut T {
    fn set_speed(&mut self, velocity: Velocity) {
        (**self).set_speed(velocity);
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn commanded_velocity(&self) -> Velocity {
        (**self).commanded_velocity()
    }

    fn operator_velocity(&self) -> Velocity {
        (**self).operator_velocity()
    }

    fn max_velocity(&self) -> Velocity {
        (**self).max_velocity()
    }

    fn set_direction(&mut self, direction: FeedDirection) {
        (**self).set_direction(direction);
    }

    fn direction(&self) -> FeedDirection {
        (**self).direction()
    }

    fn is_moving(&self) -> bool {
        (**self).is_moving()
    }

    fn run(&mut self) {
        (**self).run();
    }

    fn stop(&mut self, fast: bool) -> StopStatus {
        (**self).stop(fast)
    }
}
