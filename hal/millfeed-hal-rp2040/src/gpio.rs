//! GPIO wrappers
//!
//! Register writes through `embassy-rp` are a single SIO store, fast enough
//! for the step line's hot path.

use embassy_rp::gpio::{Input, Level as RpLevel, Output, Pin, Pull};
use embassy_rp::Peri;
use millfeed_hal::gpio::{InputPin, Level, OutputPin};

/// Push-pull output
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure a pin as output at the given level
    pub fn new(pin: Peri<'d, impl Pin>, initial: Level) -> Self {
        let initial = match initial {
            Level::Low => RpLevel::Low,
            Level::High => RpLevel::High,
        };
        Self {
            pin: Output::new(pin, initial),
        }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Digital input with a pull resistor
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Input pulled up (switch to ground, active low)
    pub fn pull_up(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }

    /// Wait for the next edge in either direction
    pub async fn wait_for_any_edge(&mut self) {
        self.pin.wait_for_any_edge().await;
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
