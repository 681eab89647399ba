//! Board-agnostic core logic for the mill power feed firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Velocity units and step-rate conversion
//! - Build-time configuration and derived motion limits
//! - Ramp math and wraparound-safe interval timing
//! - Debounced digital inputs
//! - Direction switch and override button controllers
//! - The interrupt-shared velocity setpoint
//! - Traits for the motion engine and the status display

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod input;
pub mod motion;
pub mod setpoint;
pub mod traits;
pub mod units;

pub use config::{ConfigError, FeedConfig, MotionLimits};
pub use context::FeedContext;
pub use setpoint::{SetpointCell, SetpointWatcher};
pub use units::Velocity;
