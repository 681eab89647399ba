//! RP2040-specific HAL for the power feed firmware
//!
//! This crate provides RP2040 implementations of the shared `millfeed-hal`
//! traits:
//!
//! - GPIO output and input wrappers over `embassy-rp`
//! - A monotonic clock over the `embassy-time` driver

#![no_std]

pub mod clock;
pub mod gpio;

pub use clock::EmbassyClock;
pub use gpio::{RpInput, RpOutput};
