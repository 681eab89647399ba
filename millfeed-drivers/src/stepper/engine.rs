//! Step/direction stepper engine
//!
//! Drives a step/direction/enable stepper driver (TB6600, DM542 and similar)
//! from a polling loop:
//! - Fixed-rate velocity ramp, one adjustment per ramp interval
//! - Step pulses gated on a microsecond clock, independent of the ramp
//! - Driver enable/disable around motion, exactly once per stop
//!
//! # Usage
//!
//! Every method returns within one pulse width. Call [`FeedDrive::run`] or
//! [`FeedDrive::stop`] on every pass of the main loop; they each perform at
//! most one ramp tick and one step pulse.
//!
//! ```ignore
//! let mut engine = MotionEngine::new(context, pins, clock, Delay);
//! engine.begin();
//! engine.set_speed(Velocity::from_units(12));
//!
//! loop {
//!     if switch_thrown {
//!         engine.run();
//!     } else {
//!         engine.stop(false);
//!     }
//! }
//! ```

use embedded_hal::delay::DelayNs;
use millfeed_core::context::FeedContext;
use millfeed_core::motion::{IntervalTimer, RampStep, StepRamp};
use millfeed_core::traits::{FeedDirection, FeedDrive, StopStatus};
use millfeed_core::units::Velocity;
use millfeed_hal::gpio::{Level, OutputPin};
use millfeed_hal::time::MonotonicClock;

/// The three outputs of a step/direction driver
#[derive(Debug)]
pub struct StepperPins<STEP, DIR, EN> {
    /// Step pulse (rising edge = one step)
    pub step: STEP,
    /// Direction select
    pub direction: DIR,
    /// Driver enable
    pub enable: EN,
}

/// Single-axis step generator
///
/// The engine is the only owner of the ramp and pulse state; controllers
/// reach it through `&mut`, so a ramp tick (which updates the step rate and
/// the pulse interval together) can never be observed half-done. The only
/// state shared with the encoder is the setpoint cell inside the
/// [`FeedContext`].
pub struct MotionEngine<'a, STEP, DIR, EN, CLK, DLY> {
    context: FeedContext<'a>,
    pins: StepperPins<STEP, DIR, EN>,
    clock: CLK,
    delay: DLY,
    ramp: StepRamp,
    ramp_timer: IntervalTimer,
    pulse_timer: IntervalTimer,
    /// `run()` has been called since the last `stop()`
    enabled: bool,
    /// A stop is in progress and has not yet reached rest
    stop_pending: bool,
    /// The stop in progress uses the fast deceleration rate
    fast_stop: bool,
    paused: bool,
    driver_enabled: bool,
    commanded: Velocity,
    direction: FeedDirection,
}

impl<'a, STEP, DIR, EN, CLK, DLY> MotionEngine<'a, STEP, DIR, EN, CLK, DLY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    CLK: MonotonicClock,
    DLY: DelayNs,
{
    /// Create an engine at standstill
    ///
    /// Pins are not touched until [`begin`](Self::begin).
    pub fn new(
        context: FeedContext<'a>,
        pins: StepperPins<STEP, DIR, EN>,
        clock: CLK,
        delay: DLY,
    ) -> Self {
        let ramp_timer = IntervalTimer::new(clock.now_millis());
        let pulse_timer = IntervalTimer::new(clock.now_micros());
        Self {
            ramp: StepRamp::new(*context.limits()),
            context,
            pins,
            clock,
            delay,
            ramp_timer,
            pulse_timer,
            enabled: false,
            stop_pending: false,
            fast_stop: false,
            paused: false,
            driver_enabled: false,
            commanded: Velocity::ZERO,
            direction: FeedDirection::Right,
        }
    }

    /// Bring the outputs to a known state
    ///
    /// Gives the motor one short pulse (an audible click that also settles
    /// the driver inputs), then leaves it stopped with the driver released.
    pub fn begin(&mut self) {
        let click_ms = self.context.config().startup_click_ms;

        self.pins.step.set_low();
        self.set_direction(FeedDirection::Right);
        self.write_enable(true);

        self.pins.step.set_high();
        self.delay.delay_ms(click_ms);
        self.pins.step.set_low();

        self.set_speed(Velocity::ZERO);
        self.ramp.halt();
        self.come_to_rest();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "motion engine ready, max {} sps, start {} sps",
            self.ramp.limits().max_steps_per_sec,
            self.ramp.limits().starting_steps_per_sec
        );
    }

    /// Shared context (configuration and setpoint)
    pub fn context(&self) -> &FeedContext<'a> {
        &self.context
    }

    /// Live step rate
    pub fn current_steps_per_sec(&self) -> u32 {
        self.ramp.current()
    }

    /// Target step rate
    pub fn set_steps_per_sec(&self) -> u32 {
        self.ramp.target()
    }

    /// Pulse interval for the live step rate
    pub fn micros_per_step(&self) -> u32 {
        self.ramp.micros_per_step()
    }

    /// Check whether `run()` has been called since the last stop
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check whether the driver enable output is asserted
    pub fn is_driver_enabled(&self) -> bool {
        self.driver_enabled
    }

    fn write_enable(&mut self, on: bool) {
        let active_low = self.context.config().enable_active_low;
        self.pins.enable.set_level(Level::from_high(on != active_low));
        self.driver_enabled = on;
    }

    /// Emit one step pulse if the pulse interval has elapsed
    fn pulse(&mut self) {
        let now_us = self.clock.now_micros();
        if self.ramp.is_stopped() {
            self.pulse_timer.reset(now_us);
            return;
        }
        if !self.pulse_timer.due(now_us, self.ramp.micros_per_step()) {
            return;
        }
        let width = self.context.config().pulse_width_us;
        self.pins.step.set_high();
        self.delay.delay_us(width);
        self.pins.step.set_low();
    }

    fn ramp_due(&mut self) -> bool {
        let interval = self.context.config().ramp.interval_ms;
        self.ramp_timer.due(self.clock.now_millis(), interval)
    }

    fn on_ramp_step(&mut self, step: RampStep) {
        if step == RampStep::Started && !self.driver_enabled {
            self.write_enable(true);
            self.pulse_timer.reset(self.clock.now_micros());
        }
        #[cfg(feature = "defmt")]
        if step != RampStep::Holding {
            defmt::trace!(
                "ramp {}: {} sps ({} us)",
                step,
                self.ramp.current(),
                self.ramp.micros_per_step()
            );
        }
    }

    /// Bring a stop to its end: driver released, step line idle
    fn come_to_rest(&mut self) -> StopStatus {
        self.stop_pending = false;
        self.fast_stop = false;
        self.write_enable(false);
        self.pins.step.set_low();

        let pause_cleared = self.paused;
        if pause_cleared {
            let velocity = self.context.operator_velocity();
            self.set_speed(velocity);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("feed at rest, pause cleared: {}", pause_cleared);

        StopStatus::CameToRest { pause_cleared }
    }
}

impl<STEP, DIR, EN, CLK, DLY> FeedDrive for MotionEngine<'_, STEP, DIR, EN, CLK, DLY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    CLK: MonotonicClock,
    DLY: DelayNs,
{
    fn set_speed(&mut self, velocity: Velocity) {
        let velocity = velocity.min(self.context.config().max_velocity);
        self.commanded = velocity;
        self.paused = false;
        self.ramp.set_target(self.context.steps_per_sec(velocity));
    }

    fn pause(&mut self) {
        self.paused = true;
        self.ramp.set_target(0);
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
        self.context.operator_velocity()
    }

    fn max_velocity(&self) -> Velocity {
        self.context.config().max_velocity
    }

    fn set_direction(&mut self, direction: FeedDirection) {
        let left = direction == FeedDirection::Left;
        let high = left != self.context.config().invert_direction;
        self.pins.direction.set_level(Level::from_high(high));
        self.direction = direction;
    }

    fn direction(&self) -> FeedDirection {
        self.direction
    }

    fn is_moving(&self) -> bool {
        !self.ramp.is_stopped()
    }

    fn run(&mut self) {
        if !self.enabled {
            self.enabled = true;
            self.stop_pending = false;
            self.fast_stop = false;
            self.ramp_timer.reset(self.clock.now_millis());
            let step = self.ramp.kick_start();
            self.on_ramp_step(step);
        }

        if self.ramp_due() {
            let ramp = self.context.config().ramp;
            let step = self.ramp.tick(ramp.accel_steps, ramp.decel_steps);
            self.on_ramp_step(step);
        }

        self.pulse();
    }

    fn stop(&mut self, fast: bool) -> StopStatus {
        if self.enabled {
            self.enabled = false;
            self.stop_pending = true;
            self.fast_stop =
                self.ramp.current() > self.context.limits().fast_stop_steps_per_sec;
        }
        if !self.stop_pending {
            return StopStatus::Idle;
        }
        self.fast_stop |= fast;

        if !self.ramp.is_stopped() && self.ramp_due() {
            let ramp = self.context.config().ramp;
            let decel = if self.fast_stop {
                ramp.fast_decel_steps
            } else {
                ramp.decel_steps
            };
            let step = self.ramp.tick_toward(0, ramp.accel_steps, decel);
            self.on_ramp_step(step);
        }

        if self.ramp.is_stopped() {
            return self.come_to_rest();
        }
        self.pulse();
        StopStatus::Decelerating
    }
}
