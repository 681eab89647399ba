//! Direction switch controller
//!
//! A two-throw toggle (left / off / right) drives the feed. Either throw
//! being active means "run"; neutral means "stop". Direction control stays
//! disarmed until both throws have been seen inactive, so a switch left
//! engaged across a power cycle can never start the table on its own.

use embedded_hal::delay::DelayNs;
use millfeed_hal::gpio::InputPin;

use crate::config::DebounceConfig;
use crate::input::debounce::{DebouncedInput, Polarity};
use crate::traits::{Arrows, DisplaySink, FeedDirection, FeedDrive, StopStatus};

/// Debounced switch position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectionState {
    /// Left throw engaged
    Left,
    /// Right throw engaged
    Right,
    /// Switch centered
    #[default]
    Neutral,
}

impl DirectionState {
    /// Feed direction selected by this position, if any
    pub fn direction(self) -> Option<FeedDirection> {
        match self {
            DirectionState::Left => Some(FeedDirection::Left),
            DirectionState::Right => Some(FeedDirection::Right),
            DirectionState::Neutral => None,
        }
    }

    fn arrows(self) -> Arrows {
        self.direction().map_or(Arrows::Stopped, Arrows::from)
    }
}

/// Turns the direction switch into run / stop commands
///
/// Arms either through [`begin`](Self::begin) or when the debounced switch
/// returns to neutral.
pub struct DirectionController<L, R> {
    left: DebouncedInput<L>,
    right: DebouncedInput<R>,
    state: DirectionState,
    armed: bool,
}

impl<L: InputPin, R: InputPin> DirectionController<L, R> {
    /// Create a disarmed controller over the two throws
    pub fn new(left: L, right: R, polarity: Polarity, debounce: &DebounceConfig) -> Self {
        Self {
            left: DebouncedInput::new(
                left,
                polarity,
                debounce.toggle_ms,
                debounce.read_interval_ms,
            ),
            right: DebouncedInput::new(
                right,
                polarity,
                debounce.toggle_ms,
                debounce.read_interval_ms,
            ),
            state: DirectionState::Neutral,
            armed: false,
        }
    }

    /// Boot interlock
    ///
    /// Returns immediately when the switch is centered. Otherwise reports
    /// the fault and blocks until both throws read inactive. There is no
    /// timeout: the board must not come up with motion armed.
    pub fn begin<DL, S>(&mut self, delay: &mut DL, display: &mut S)
    where
        DL: DelayNs,
        S: DisplaySink + ?Sized,
    {
        if self.throw_engaged() {
            #[cfg(feature = "defmt")]
            defmt::warn!("direction switch engaged at boot, waiting for neutral");
            display.boot_error();
            while self.throw_engaged() {
                delay.delay_ms(1);
            }
        }
        self.armed = true;
    }

    /// One pass of the control loop
    ///
    /// Samples both throws, updates the arrows on a position change, then
    /// either runs the feed (armed and thrown) or steps its stop.
    pub fn poll<D, S>(&mut self, now_ms: u32, drive: &mut D, display: &mut S)
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        let left_edge = self.left.poll(now_ms);
        let right_edge = self.right.poll(now_ms);
        if left_edge.is_some() || right_edge.is_some() {
            self.update_state(display);
        }

        match self.state.direction() {
            Some(side) if self.armed => {
                if side == drive.direction() {
                    drive.run();
                } else if drive.is_moving() {
                    // Reversal: come to rest before flipping the output
                    Self::stop(drive, display);
                } else {
                    drive.set_direction(side);
                    drive.run();
                }
            }
            _ => Self::stop(drive, display),
        }
    }

    /// Debounced switch position
    pub fn state(&self) -> DirectionState {
        self.state
    }

    /// Check whether the boot interlock has been satisfied
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    fn throw_engaged(&self) -> bool {
        self.left.read_raw() || self.right.read_raw()
    }

    fn update_state<S: DisplaySink + ?Sized>(&mut self, display: &mut S) {
        // Left wins if both throws read active
        let next = if self.left.is_active() {
            DirectionState::Left
        } else if self.right.is_active() {
            DirectionState::Right
        } else {
            DirectionState::Neutral
        };

        if next != self.state {
            #[cfg(feature = "defmt")]
            defmt::debug!("direction switch: {}", next);
            self.state = next;
            if next == DirectionState::Neutral {
                self.armed = true;
            }
            display.print_arrows(next.arrows());
        }
    }

    fn stop<D, S>(drive: &mut D, display: &mut S)
    where
        D: FeedDrive + ?Sized,
        S: DisplaySink + ?Sized,
    {
        if let StopStatus::CameToRest {
            pause_cleared: true,
        } = drive.stop(false)
        {
            display.write_speed(drive.commanded_velocity());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::{DisplayEvent, FakeDrive, RecordingDisplay};
    use crate::units::Velocity;
    use millfeed_hal::mock::{ManualClock, PinProbe};

    type Controller<'a> = DirectionController<&'a PinProbe, &'a PinProbe>;

    fn controller<'a>(left: &'a PinProbe, right: &'a PinProbe) -> Controller<'a> {
        DirectionController::new(left, right, Polarity::ActiveLow, &DebounceConfig::DEFAULT)
    }

    fn run_until(
        ctrl: &mut Controller<'_>,
        from_ms: u32,
        to_ms: u32,
        drive: &mut FakeDrive,
        display: &mut RecordingDisplay,
    ) {
        let mut now = from_ms;
        while now <= to_ms {
            ctrl.poll(now, drive, display);
            now += 10;
        }
    }

    #[test]
    fn test_begin_neutral_is_immediate() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let clock = ManualClock::default();
        let mut display = RecordingDisplay::default();

        ctrl.begin(&mut &clock, &mut display);

        assert!(ctrl.is_armed());
        assert_eq!(clock.total_micros(), 0);
        assert!(display.events.is_empty());
    }

    #[test]
    fn test_begin_blocks_until_neutral() {
        let left = PinProbe::new(false);
        let right = PinProbe::new(true);
        left.flip_after_reads(20, true);
        let mut ctrl = controller(&left, &right);
        let clock = ManualClock::default();
        let mut display = RecordingDisplay::default();

        ctrl.begin(&mut &clock, &mut display);

        assert!(ctrl.is_armed());
        assert!(clock.total_micros() >= 19_000);
        assert_eq!(display.events, [DisplayEvent::BootError]);
    }

    #[test]
    fn test_begin_blocks_on_right_throw() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(false);
        right.flip_after_reads(30, true);
        let mut ctrl = controller(&left, &right);
        let clock = ManualClock::default();
        let mut display = RecordingDisplay::default();

        assert!(!ctrl.is_armed());
        ctrl.begin(&mut &clock, &mut display);

        assert!(ctrl.is_armed());
        assert!(clock.total_micros() >= 29_000);
        assert_eq!(display.events, [DisplayEvent::BootError]);
    }

    #[test]
    fn test_throw_runs_and_neutral_stops() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let mut drive = FakeDrive::new(Velocity::from_units(10));
        let mut display = RecordingDisplay::default();
        ctrl.begin(&mut &ManualClock::default(), &mut display);

        left.set(false);
        run_until(&mut ctrl, 0, 150, &mut drive, &mut display);
        assert_eq!(ctrl.state(), DirectionState::Left);
        assert_eq!(drive.direction, FeedDirection::Left);
        assert!(drive.moving);
        assert!(display.events.contains(&DisplayEvent::Arrows(Arrows::Left)));

        left.set(true);
        run_until(&mut ctrl, 160, 300, &mut drive, &mut display);
        assert_eq!(ctrl.state(), DirectionState::Neutral);
        assert!(!drive.moving);
        assert_eq!(
            display.events.last(),
            Some(&DisplayEvent::Arrows(Arrows::Stopped))
        );
    }

    #[test]
    fn test_short_blip_is_ignored() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let mut drive = FakeDrive::new(Velocity::from_units(10));
        let mut display = RecordingDisplay::default();
        ctrl.begin(&mut &ManualClock::default(), &mut display);

        run_until(&mut ctrl, 0, 40, &mut drive, &mut display);
        left.set(false);
        run_until(&mut ctrl, 50, 50, &mut drive, &mut display);
        left.set(true);
        run_until(&mut ctrl, 60, 300, &mut drive, &mut display);

        assert_eq!(ctrl.state(), DirectionState::Neutral);
        assert_eq!(drive.runs, 0);
        assert!(display.events.is_empty());
    }

    #[test]
    fn test_reversal_waits_for_rest() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let mut drive = FakeDrive::new(Velocity::from_units(10));
        drive.coast = 3;
        let mut display = RecordingDisplay::default();
        ctrl.begin(&mut &ManualClock::default(), &mut display);

        left.set(false);
        run_until(&mut ctrl, 0, 150, &mut drive, &mut display);
        assert_eq!(drive.direction, FeedDirection::Left);

        left.set(true);
        right.set(false);
        run_until(&mut ctrl, 160, 400, &mut drive, &mut display);

        assert_eq!(ctrl.state(), DirectionState::Right);
        assert_eq!(drive.direction, FeedDirection::Right);
        assert_eq!(
            drive.direction_changes,
            [FeedDirection::Left, FeedDirection::Right]
        );
        assert_eq!(drive.rests, 1);
        assert!(drive.moving);
    }

    #[test]
    fn test_engaged_without_interlock_never_runs() {
        let left = PinProbe::new(false);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let mut drive = FakeDrive::new(Velocity::from_units(10));
        let mut display = RecordingDisplay::default();

        run_until(&mut ctrl, 0, 300, &mut drive, &mut display);
        assert_eq!(ctrl.state(), DirectionState::Left);
        assert!(!ctrl.is_armed());
        assert_eq!(drive.runs, 0);

        left.set(true);
        run_until(&mut ctrl, 310, 500, &mut drive, &mut display);
        assert!(ctrl.is_armed());

        left.set(false);
        run_until(&mut ctrl, 510, 700, &mut drive, &mut display);
        assert!(drive.runs > 0);
    }

    #[test]
    fn test_rest_after_cleared_pause_redisplays_speed() {
        let left = PinProbe::new(true);
        let right = PinProbe::new(true);
        let mut ctrl = controller(&left, &right);
        let mut drive = FakeDrive::new(Velocity::from_units(12));
        drive.moving = true;
        drive.pause();
        let mut display = RecordingDisplay::default();
        ctrl.begin(&mut &ManualClock::default(), &mut display);

        ctrl.poll(0, &mut drive, &mut display);
        ctrl.poll(10, &mut drive, &mut display);

        assert!(!drive.is_paused());
        assert_eq!(
            display.events,
            [DisplayEvent::Speed(Velocity::from_units(12))]
        );
    }
}
