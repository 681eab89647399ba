//! Pin assignments for a Raspberry Pi Pico on the feed control board
//!
//! | Signal            | GPIO |
//! |-------------------|------|
//! | Step pulse        | 2    |
//! | Direction         | 3    |
//! | Driver enable     | 4    |
//! | Switch, left      | 6    |
//! | Switch, right     | 7    |
//! | Rapid button      | 8    |
//! | Knob A            | 10   |
//! | Knob B            | 11   |
//! | Knob push         | 12   |
//! | LCD RS            | 16   |
//! | LCD EN            | 17   |
//! | LCD D4-D7         | 18-21|
//!
//! All inputs are pulled up and switch to ground.

use embassy_rp::Peripherals;
use millfeed_display::Hd44780Pins;
use millfeed_drivers::stepper::StepperPins;
use millfeed_hal::gpio::Level;
use millfeed_hal_rp2040::{RpInput, RpOutput};

pub type Out = RpOutput<'static>;
pub type In = RpInput<'static>;

/// Every pin the firmware uses
pub struct Board {
    pub stepper: StepperPins<Out, Out, Out>,
    pub lcd: Hd44780Pins<Out, Out, Out, Out, Out, Out>,
    pub left_throw: In,
    pub right_throw: In,
    pub rapid: In,
    pub knob_a: In,
    pub knob_b: In,
    pub knob_push: In,
}

impl Board {
    /// Claim and configure the pins
    ///
    /// The enable line starts high, which releases an active-low driver.
    pub fn new(p: Peripherals) -> Self {
        Self {
            stepper: StepperPins {
                step: RpOutput::new(p.PIN_2, Level::Low),
                direction: RpOutput::new(p.PIN_3, Level::Low),
                enable: RpOutput::new(p.PIN_4, Level::High),
            },
            lcd: Hd44780Pins {
                rs: RpOutput::new(p.PIN_16, Level::Low),
                en: RpOutput::new(p.PIN_17, Level::Low),
                d4: RpOutput::new(p.PIN_18, Level::Low),
                d5: RpOutput::new(p.PIN_19, Level::Low),
                d6: RpOutput::new(p.PIN_20, Level::Low),
                d7: RpOutput::new(p.PIN_21, Level::Low),
            },
            left_throw: RpInput::pull_up(p.PIN_6),
            right_throw: RpInput::pull_up(p.PIN_7),
            rapid: RpInput::pull_up(p.PIN_8),
            knob_a: RpInput::pull_up(p.PIN_10),
            knob_b: RpInput::pull_up(p.PIN_11),
            knob_push: RpInput::pull_up(p.PIN_12),
        }
    }
}
