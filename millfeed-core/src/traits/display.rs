//! Status display trait
//!
//! Every call is fire-and-forget: there is no return value and failures are
//! swallowed by the implementation. Calls may block briefly while the device
//! refreshes.

use crate::traits::feed::FeedDirection;
use crate::units::Velocity;

/// Travel indicator on the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arrows {
    /// Moving left (`<<<<`)
    Left,
    /// Moving right (`>>>>`)
    Right,
    /// Direction switch in neutral
    #[default]
    Stopped,
}

impl From<FeedDirection> for Arrows {
    fn from(direction: FeedDirection) -> Self {
        match direction {
            FeedDirection::Left => Arrows::Left,
            FeedDirection::Right => Arrows::Right,
        }
    }
}

/// Operator status display
pub trait DisplaySink {
    /// Boot banner
    fn welcome_message(&mut self);

    /// Direction switch was engaged at power-up
    fn boot_error(&mut self);

    /// Rapid override active
    fn rapid_message(&mut self);

    /// Feed paused
    fn paused_message(&mut self);

    /// Show the selected feed velocity
    fn write_speed(&mut self, velocity: Velocity);

    /// Show the travel indicator
    fn print_arrows(&mut self, arrows: Arrows);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn welcome_message(&mut self) {
        (**self).welcome_message();
    }

    fn boot_error(&mut self) {
        (**self).boot_error();
    }

    fn rapid_message(&mut self) {
        (**self).rapid_message();
    }

    fn paused_message(&mut self) {
        (**self).paused_message();
    }

    fn write_speed(&mut self, velocity: Velocity) {
        (**self).write_speed(velocity);
    }

    fn print_arrows(&mut self, arrows: Arrows) {
        (**self).print_arrows(arrows);
    }
}

/// Display that discards everything (headless builds)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn welcome_message(&mut self) {}

    fn boot_error(&mut self) {}

    fn rapid_message(&mut self) {}

    fn paused_message(&mut self) {}

    fn write_speed(&mut self, _velocity: Velocity) {}

    fn print_arrows(&mut self, _arrows: Arrows) {}
}
