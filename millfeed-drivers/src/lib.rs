//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in millfeed-core:
//!
//! - Step/direction/enable stepper engine ([`stepper::MotionEngine`])

#![no_std]
#![deny(unsafe_code)]

pub mod stepper;
