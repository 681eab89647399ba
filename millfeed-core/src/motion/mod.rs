//! Motion math
//!
//! Step-rate ramping and wraparound-safe interval gating for the step
//! generator.

pub mod ramp;
pub mod timing;

pub use ramp::{RampStep, StepRamp};
pub use timing::IntervalTimer;
