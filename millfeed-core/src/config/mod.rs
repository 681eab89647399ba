//! Configuration types
//!
//! All motion constants are fixed at build time. [`FeedConfig::DEFAULT`]
//! describes the reference machine; boards override fields with struct
//! update syntax and call [`FeedConfig::validate`] once at boot.

pub mod limits;
pub mod types;

pub use limits::*;
pub use types::*;
