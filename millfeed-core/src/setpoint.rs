//! Operator velocity setpoint
//!
//! The encoder is the only writer, from its own task or from interrupt
//! context; the polling loop only reads. The value is a single `u32`, so a plain atomic load/store
//! pair is enough: no read can observe a torn value and no lock is needed.

use portable_atomic::{AtomicU32, Ordering};

use crate::units::Velocity;

/// Single-producer / single-consumer velocity cell
#[derive(Debug)]
pub struct SetpointCell {
    hundredths: AtomicU32,
}

impl SetpointCell {
    /// Cell holding `initial`
    pub const fn new(initial: Velocity) -> Self {
        Self {
            hundredths: AtomicU32::new(initial.hundredths()),
        }
    }

    /// Current setpoint
    pub fn get(&self) -> Velocity {
        Velocity::from_hundredths(self.hundredths.load(Ordering::Acquire))
    }

    /// Replace the setpoint
    pub fn set(&self, velocity: Velocity) {
        self.hundredths.store(velocity.hundredths(), Ordering::Release);
    }

    /// Move the setpoint by `detents` increments, clamped to `[0, max]`
    ///
    /// Load and store are separate operations; callers must keep to a single
    /// writer. Returns the new setpoint.
    pub fn nudge(&self, detents: i32, increment: Velocity, max: Velocity) -> Velocity {
        let current = self.get();
        let delta = Velocity::from_hundredths(
            increment.hundredths().saturating_mul(detents.unsigned_abs()),
        );
        let next = if detents >= 0 {
            current.saturating_add(delta)
        } else {
            current.saturating_sub(delta)
        };
        let next = next.min(max);
        self.set(next);
        next
    }
}

impl Default for SetpointCell {
    fn default() -> Self {
        Self::new(Velocity::ZERO)
    }
}

/// Change detector for the consumer side of a [`SetpointCell`]
#[derive(Debug, Clone, Default)]
pub struct SetpointWatcher {
    last: Option<Velocity>,
}

impl SetpointWatcher {
    /// Watcher that reports the first value it sees
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Return the setpoint if it changed since the previous poll
    pub fn poll(&mut self, cell: &SetpointCell) -> Option<Velocity> {
        let now = cell.get();
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now)
    }
}
