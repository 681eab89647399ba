//! Embassy async tasks
//!
//! The feed loop runs on the main task; everything else is spawned here.

pub mod encoder;

pub use encoder::encoder_task;
