//! Step-rate ramp
//!
//! Moves the live step rate toward a target by a fixed amount per ramp tick
//! and keeps the derived pulse interval in sync with it.

use crate::config::MotionLimits;
use crate::units::micros_per_step;

/// Outcome of one ramp tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampStep {
    /// Already at the goal, nothing changed
    Holding,
    /// Rate went from zero to positive
    Started,
    /// Rate increased
    Accelerated,
    /// Rate decreased but is still positive
    Decelerated,
    /// Rate reached zero
    Stopped,
}

/// Live step rate, its target, and the derived pulse interval
///
/// Invariants, held after every method:
/// - `current <= limits.max_steps_per_sec`
/// - `micros_per_step >= limits.min_micros_per_step`
/// - `micros_per_step == 1_000_000 / current` (clamped) when `current > 0`,
///   otherwise `limits.idle_micros_per_step`
/// - a tick never carries `current` past its goal
#[derive(Debug, Clone)]
pub struct StepRamp {
    current: u32,
    target: u32,
    micros_per_step: u32,
    limits: MotionLimits,
}

impl StepRamp {
    /// Ramp at standstill with a zero target
    pub const fn new(limits: MotionLimits) -> Self {
        Self {
            current: 0,
            target: 0,
            micros_per_step: limits.idle_micros_per_step,
            limits,
        }
    }

    /// Set the target rate, clamped to the maximum
    ///
    /// Takes effect over subsequent ticks.
    pub fn set_target(&mut self, steps_per_sec: u32) {
        self.target = steps_per_sec.min(self.limits.max_steps_per_sec);
    }

    /// Target step rate
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Live step rate
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Pulse interval for the live step rate
    pub fn micros_per_step(&self) -> u32 {
        self.micros_per_step
    }

    /// Limits this ramp was built with
    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    /// Check if the live rate equals the target
    pub fn is_at_target(&self) -> bool {
        self.current == self.target
    }

    /// Check if the live rate is zero
    pub fn is_stopped(&self) -> bool {
        self.current == 0
    }

    /// Lowest rate a ramp toward `goal` may start from
    fn start_floor(&self, goal: u32) -> u32 {
        self.limits.starting_steps_per_sec.min(goal)
    }

    /// Jump straight to the starting rate if below it and a move is wanted
    ///
    /// A stepper cannot accelerate smoothly from zero with usable torque, so
    /// motion begins at the torque-safe starting rate. Never jumps past the
    /// target. Returns [`RampStep::Started`] when this took the rate off zero.
    pub fn kick_start(&mut self) -> RampStep {
        let floor = self.start_floor(self.target);
        if self.current >= floor {
            return RampStep::Holding;
        }
        let was_stopped = self.current == 0;
        self.current = floor;
        self.recompute();
        if was_stopped {
            RampStep::Started
        } else {
            RampStep::Accelerated
        }
    }

    /// One ramp tick toward the target
    pub fn tick(&mut self, accel: u32, decel: u32) -> RampStep {
        self.tick_toward(self.target, accel, decel)
    }

    /// One ramp tick toward an explicit goal (the stop path ramps to zero
    /// without forgetting the target)
    pub fn tick_toward(&mut self, goal: u32, accel: u32, decel: u32) -> RampStep {
        let goal = goal.min(self.limits.max_steps_per_sec);
        let before = self.current;

        if before < goal {
            let floor = self.start_floor(goal);
            self.current = if before < floor {
                floor
            } else {
                before.saturating_add(accel).min(goal)
            };
        } else if before > goal {
            self.current = before.saturating_sub(decel).max(goal);
        } else {
            return RampStep::Holding;
        }

        self.recompute();

        match (before, self.current) {
            (0, after) if after > 0 => RampStep::Started,
            (_, 0) => RampStep::Stopped,
            (b, a) if a > b => RampStep::Accelerated,
            (b, a) if a < b => RampStep::Decelerated,
            _ => RampStep::Holding,
        }
    }

    /// Drop the live rate to zero immediately
    pub fn halt(&mut self) {
        self.current = 0;
        self.recompute();
    }

    /// Recompute the pulse interval from the live rate
    ///
    /// Zero rate gets the idle interval instead of a division by zero, and
    /// intervals shorter than the hardware-safe minimum are clamped up.
    fn recompute(&mut self) {
        self.micros_per_step = match micros_per_step(self.current) {
            Some(us) => us.max(self.limits.min_micros_per_step),
            None => self.limits.idle_micros_per_step,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::units::Velocity;
    use proptest::prelude::*;

    fn scenario_limits() -> MotionLimits {
        FeedConfig {
            max_velocity: Velocity::from_units(35),
            ..FeedConfig::DEFAULT
        }
        .limits()
    }

    #[test]
    fn test_initial_state() {
        let ramp = StepRamp::new(scenario_limits());
        assert_eq!(ramp.current(), 0);
        assert!(ramp.is_stopped());
        assert_eq!(ramp.micros_per_step(), ramp.limits().idle_micros_per_step);
    }

    #[test]
    fn test_kick_start_to_starting_rate() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(4667);
        assert_eq!(ramp.kick_start(), RampStep::Started);
        assert_eq!(ramp.current(), 13);
        assert_eq!(ramp.micros_per_step(), 1_000_000 / 13);
        // Already above the floor
        assert_eq!(ramp.kick_start(), RampStep::Holding);
    }

    #[test]
    fn test_kick_start_never_passes_small_target() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(5);
        ramp.kick_start();
        assert_eq!(ramp.current(), 5);
    }

    #[test]
    fn test_kick_start_with_zero_target_stays_stopped() {
        let mut ramp = StepRamp::new(scenario_limits());
        assert_eq!(ramp.kick_start(), RampStep::Holding);
        assert!(ramp.is_stopped());
    }

    #[test]
    fn test_accelerates_to_scenario_max() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(4667);
        ramp.kick_start();

        let mut ticks = 0;
        let mut previous = ramp.current();
        while !ramp.is_at_target() {
            ramp.tick(20, 20);
            ticks += 1;
            let now = ramp.current();
            assert!(now - previous <= 20);
            assert!(now <= 4667);
            assert_eq!(
                ramp.micros_per_step(),
                (1_000_000 / now).max(ramp.limits().min_micros_per_step)
            );
            previous = now;
        }
        // (4667 - 13) / 20 rounded up
        assert_eq!(ticks, 233);
        assert_eq!(ramp.micros_per_step(), 214);
    }

    #[test]
    fn test_decelerate_to_zero() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(100);
        ramp.kick_start();
        while !ramp.is_at_target() {
            ramp.tick(20, 20);
        }

        assert_eq!(ramp.tick_toward(0, 20, 40), RampStep::Decelerated);
        assert_eq!(ramp.current(), 60);
        assert_eq!(ramp.tick_toward(0, 20, 40), RampStep::Decelerated);
        assert_eq!(ramp.tick_toward(0, 20, 40), RampStep::Stopped);
        assert_eq!(ramp.current(), 0);
        assert_eq!(ramp.micros_per_step(), ramp.limits().idle_micros_per_step);
        // Target survives the stop
        assert_eq!(ramp.target(), 100);
    }

    #[test]
    fn test_tick_from_zero_reports_started() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(1000);
        assert_eq!(ramp.tick(20, 20), RampStep::Started);
        assert_eq!(ramp.current(), 13);
    }

    #[test]
    fn test_target_clamped_to_max() {
        let mut ramp = StepRamp::new(scenario_limits());
        ramp.set_target(1_000_000);
        assert_eq!(ramp.target(), 4667);
    }

    proptest! {
        #[test]
        fn prop_converges_without_overshoot(
            start_target in 0u32..6000,
            target in 0u32..6000,
            accel in 1u32..200,
            decel in 1u32..200,
        ) {
            let limits = scenario_limits();
            let mut ramp = StepRamp::new(limits);
            ramp.set_target(start_target);
            ramp.kick_start();
            while !ramp.is_at_target() {
                ramp.tick(accel, decel);
            }

            ramp.set_target(target);
            ramp.kick_start();
            let goal = ramp.target();
            let from = ramp.current();
            let rate = if goal >= from { accel } else { decel };
            let bound = goal.abs_diff(from).div_ceil(rate);

            let mut ticks = 0;
            while !ramp.is_at_target() {
                let before = ramp.current();
                ramp.tick(accel, decel);
                let after = ramp.current();
                // Strictly toward the goal, never past it
                if before < goal {
                    prop_assert!(after > before && after <= goal);
                } else {
                    prop_assert!(after < before && after >= goal);
                }
                ticks += 1;
                prop_assert!(ticks <= bound);
            }
            prop_assert_eq!(ramp.current(), goal);
        }

        #[test]
        fn prop_interval_never_below_floor(
            target in 0u32..10_000,
            ticks in 0usize..400,
        ) {
            let limits = scenario_limits();
            let mut ramp = StepRamp::new(limits);
            ramp.set_target(target);
            for _ in 0..ticks {
                ramp.tick(37, 53);
                prop_assert!(ramp.micros_per_step() >= limits.min_micros_per_step);
                prop_assert!(ramp.current() <= limits.max_steps_per_sec);
            }
        }
    }
}
