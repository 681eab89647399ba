//! Test doubles for the controller tests

extern crate std;

use std::vec::Vec;

use crate::traits::{Arrows, DisplaySink, FeedDirection, FeedDrive, StopStatus};
use crate::units::Velocity;

/// Display call, in order of arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    Welcome,
    BootError,
    Rapid,
    Paused,
    Speed(Velocity),
    Arrows(Arrows),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
}

impl DisplaySink for RecordingDisplay {
    fn welcome_message(&mut self) {
        self.events.push(DisplayEvent::Welcome);
    }

    fn boot_error(&mut self) {
        self.events.push(DisplayEvent::BootError);
    }

    fn rapid_message(&mut self) {
        self.events.push(DisplayEvent::Rapid);
    }

    fn paused_message(&mut self) {
        self.events.push(DisplayEvent::Paused);
    }

    fn write_speed(&mut self, velocity: Velocity) {
        self.events.push(DisplayEvent::Speed(velocity));
    }

    fn print_arrows(&mut self, arrows: Arrows) {
        self.events.push(DisplayEvent::Arrows(arrows));
    }
}

/// Drive with no ramp: `run()` starts it immediately and `stop()` takes
/// `coast` extra calls to come to rest.
#[derive(Debug)]
pub struct FakeDrive {
    pub commanded: Velocity,
    pub operator: Velocity,
    pub max: Velocity,
    pub paused: bool,
    pub direction: FeedDirection,
    pub direction_changes: Vec<FeedDirection>,
    pub moving: bool,
    pub coast: u32,
    pub coasting: u32,
    pub runs: u32,
    pub rests: u32,
}

impl FakeDrive {
    pub fn new(velocity: Velocity) -> Self {
        Self {
            commanded: velocity,
            operator: velocity,
            max: Velocity::from_units(36),
            paused: false,
            direction: FeedDirection::Right,
            direction_changes: Vec::new(),
            moving: false,
            coast: 0,
            coasting: 0,
            runs: 0,
            rests: 0,
        }
    }
}

impl FeedDrive for FakeDrive {
    fn set_speed(&mut self, velocity: Velocity) {
        self.commanded = velocity;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn commanded_velocity(&self) -> Velocity {
        if self.paused {
            Velocity::ZERO
        } else {
            self.commanded
        }
    }

    fn operator_velocity(&self) -> Velocity {
        self.operator
    }

    fn max_velocity(&self) -> Velocity {
        self.max
    }

    fn set_direction(&mut self, direction: FeedDirection) {
        self.direction = direction;
        self.direction_changes.push(direction);
    }

    fn direction(&self) -> FeedDirection {
        self.direction
    }

    fn is_moving(&self) -> bool {
        self.moving
    }

    fn run(&mut self) {
        self.runs += 1;
        self.moving = !self.commanded_velocity().is_zero();
        self.coasting = self.coast;
    }

    fn stop(&mut self, _fast: bool) -> StopStatus {
        if !self.moving {
            return StopStatus::Idle;
        }
        if self.coasting > 0 {
            self.coasting -= 1;
            return StopStatus::Decelerating;
        }
        self.moving = false;
        self.rests += 1;
        let pause_cleared = self.paused;
        if pause_cleared {
            self.paused = false;
            self.commanded = self.operator;
        }
        StopStatus::CameToRest { pause_cleared }
    }
}
