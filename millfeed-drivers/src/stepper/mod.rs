//! Stepper driver implementations

pub mod engine;

pub use engine::{MotionEngine, StepperPins};
