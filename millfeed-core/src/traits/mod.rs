//! Collaborator traits
//!
//! These traits define the interface between the input controllers and the
//! hardware-facing implementations (the step engine and the status display).

pub mod display;
pub mod feed;

pub use display::{Arrows, DisplaySink, NullDisplay};
pub use feed::{FeedDirection, FeedDrive, StopStatus};
