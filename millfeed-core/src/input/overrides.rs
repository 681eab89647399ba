//! Momentary override buttons
//!
//! One controller per button. In [`OverrideMode::Rapid`] the feed runs at
//! maximum velocity while the button is held and returns to exactly what it
//! was doing on release. In [`OverrideMode::PauseToggle`] each release
//! toggles a pause.

use millfeed_hal::gpio::InputPin;

use crate::config::DebounceConfig;
use crate::input::debounce::{DebouncedInput, Edge, Polarity};
use crate::traits::{DisplaySink, FeedDrive};
use crate::units::Velocity;

/// What the button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverrideMode {
    /// Hold for maximum velocity
    Rapid,
    /// Each release toggles pause
    PauseToggle,
}

/// Velocity in effect when a rapid override began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedSnapshot {
    /// Commanded velocity (zero if paused)
    pub velocity: Velocity,
    /// Whether the feed was paused
    pub paused: bool,
}

impl SpeedSnapshot {
    /// Capture the drive's current command
    pub fn capture<D: FeedDrive + ?Sized>(drive: &D) -> Self {
        Self {
            velocity: drive.commanded_velocity(),
            paused: drive.is_paused(),
        }
    }
}

/// Edge-triggered override button
pub struct OverrideController<P> {
    button: DebouncedInput<P>,
    mode: OverrideMode,
    snapshot: Option<SpeedSnapshot>,
}

impl<P: InputPin> OverrideController<P> {
    /// Create a controller using the momentary-button debounce delay
    pub fn new(pin: P, polarity: Polarity, mode: OverrideMode, debounce: &DebounceConfig) -> Self {
        Self {
            button: DebouncedInput::new(
                pin,
                polarity,
                debounce.momentary_ms,
                debounce.read_interval_ms,
            ),
            mode,
            snapshot: None,
        }
    }

    /// Sample the button and act on a debounced edge
    ///
    /// Returns the edge that was acted on, if any.
    pub fn poll<D, S>(&mut self, now_ms: u32, drive: &mut D, display: &mut S) -> Option<Edge>
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        let edge = self.button.poll(now_ms)?;
        match (self.mode, edge) {
            (OverrideMode::Rapid, Edge::Activated) => self.begin_rapid(drive, display),
            (OverrideMode::Rapid, Edge::Deactivated) => self.end_rapid(drive, display),
            (OverrideMode::PauseToggle, Edge::Deactivated) => Self::toggle_pause(drive, display),
            (OverrideMode::PauseToggle, Edge::Activated) => {}
        }
        Some(edge)
    }

    /// Snapshot held while a rapid override is active
    pub fn snapshot(&self) -> Option<SpeedSnapshot> {
        self.snapshot
    }

    fn begin_rapid<D, S>(&mut self, drive: &mut D, display: &mut S)
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        let snapshot = SpeedSnapshot::capture(drive);
        #[cfg(feature = "defmt")]
        defmt::debug!("rapid on, saved {}", snapshot);
        self.snapshot = Some(snapshot);
        drive.set_speed(drive.max_velocity());
        display.rapid_message();
    }

    fn end_rapid<D, S>(&mut self, drive: &mut D, display: &mut S)
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        #[cfg(feature = "defmt")]
        defmt::debug!("rapid off, restoring {}", snapshot);
        if snapshot.paused {
            drive.pause();
            display.paused_message();
        } else {
            drive.set_speed(snapshot.velocity);
            display.write_speed(snapshot.velocity);
        }
    }

    fn toggle_pause<D, S>(drive: &mut D, display: &mut S)
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        if drive.is_paused() {
            let velocity = drive.operator_velocity();
            drive.set_speed(velocity);
            display.write_speed(velocity);
        } else {
            drive.pause();
            display.paused_message();
        }
    }
}
