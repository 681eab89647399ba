//! Operator status messages
//!
//! Row 0 carries the feed rate or a banner, row 1 the travel arrows. The
//! arrows row survives banner messages so the operator can always see which
//! way the table is set to go.

use core::fmt::Write;

use heapless::String;
use millfeed_core::traits::{Arrows, DisplaySink};
use millfeed_core::units::Velocity;

use crate::backend::CharacterDisplay;
use crate::screen::{Screen, LINE_LEN};

const TOP: usize = 0;
const BOTTOM: usize = 1;

const SPEED_PREFIX: &str = "Inch/min: ";

const WELCOME: [&str; 2] = ["-- POWER FEED --", "---- READY! ----"];
const BOOT_ERROR: [&str; 2] = ["***  ERROR  ****", "* RESET SWITCH *"];
const RAPID: &str = "---- RAPID ---- ";

const ARROWS_LEFT: &str = "   <<<<         ";
const ARROWS_RIGHT: &str = "         >>>>   ";
const ARROWS_STOPPED: &str = "  # STOPPED #   ";

const PAUSED_LEFT: &str = "<<<< PAUSED ----";
const PAUSED_RIGHT: &str = "---- PAUSED >>>>";

fn arrows_line(arrows: Arrows) -> &'static str {
    match arrows {
        Arrows::Left => ARROWS_LEFT,
        Arrows::Right => ARROWS_RIGHT,
        Arrows::Stopped => ARROWS_STOPPED,
    }
}

/// Status messages on a 16x2 character display
pub struct LcdMessages<B> {
    backend: B,
    screen: Screen,
    arrows: Arrows,
    speed: Velocity,
    /// Row 0 shows the speed and row 1 the arrows
    showing_speed: bool,
}

impl<B: CharacterDisplay> LcdMessages<B> {
    /// Take over a display and blank it
    pub fn new(mut backend: B) -> Self {
        let _ = backend.clear();
        Self {
            backend,
            screen: Screen::new(),
            arrows: Arrows::Stopped,
            speed: Velocity::ZERO,
            showing_speed: false,
        }
    }

    /// Buffered screen contents
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Last speed written
    pub fn speed(&self) -> Velocity {
        self.speed
    }

    fn set_speed_line(&mut self) {
        let mut line: String<LINE_LEN> = String::new();
        // Overflow only drops trailing characters
        let _ = write!(line, "{}{}", SPEED_PREFIX, self.speed);
        self.screen.set_line(TOP, &line);
    }

    fn refresh(&mut self) {
        if let Err(_e) = self.screen.flush(&mut self.backend) {
            #[cfg(feature = "defmt")]
            defmt::warn!("display write failed: {}", _e);
        }
    }
}

impl<B: CharacterDisplay> DisplaySink for LcdMessages<B> {
    fn welcome_message(&mut self) {
        self.showing_speed = false;
        self.screen.set_line(TOP, WELCOME[0]);
        self.screen.set_line(BOTTOM, WELCOME[1]);
        self.refresh();
    }

    fn boot_error(&mut self) {
        self.showing_speed = false;
        self.screen.set_line(TOP, BOOT_ERROR[0]);
        self.screen.set_line(BOTTOM, BOOT_ERROR[1]);
        self.refresh();
    }

    fn rapid_message(&mut self) {
        self.showing_speed = false;
        self.screen.set_line(TOP, RAPID);
        self.refresh();
    }

    fn paused_message(&mut self) {
        self.showing_speed = false;
        self.set_speed_line();
        match self.arrows {
            Arrows::Left => self.screen.set_line(BOTTOM, PAUSED_LEFT),
            Arrows::Right => self.screen.set_line(BOTTOM, PAUSED_RIGHT),
            Arrows::Stopped => {}
        }
        self.refresh();
    }

    fn write_speed(&mut self, velocity: Velocity) {
        self.speed = velocity;
        self.set_speed_line();
        if !self.showing_speed {
            self.showing_speed = true;
            self.screen.set_line(BOTTOM, arrows_line(self.arrows));
        }
        self.refresh();
    }

    fn print_arrows(&mut self, arrows: Arrows) {
        self.arrows = arrows;
        self.screen.set_line(BOTTOM, arrows_line(arrows));
        self.refresh();
    }
}
