//! Operator status display for the mill power feed
//!
//! This crate provides:
//! - `CharacterDisplay` trait for text-mode display hardware
//! - `Screen`, a 16x2 line buffer that only rewrites changed rows
//! - `LcdMessages`, the status messages shown to the operator, implementing
//!   the core `DisplaySink` trait
//! - `Hd44780`, a 4-bit parallel driver for HD44780-compatible modules
//!
//! # Architecture
//!
//! The controllers talk to a `DisplaySink` and never wait on the display;
//! `LcdMessages` composes lines into the `Screen` and pushes dirty rows to
//! whatever `CharacterDisplay` it owns.

#![no_std]

pub mod backend;
pub mod hd44780;
pub mod messages;
pub mod screen;

// Re-export key types
pub use backend::{CharacterDisplay, DisplayError};
pub use hd44780::{Hd44780, Hd44780Pins};
pub use messages::LcdMessages;
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
