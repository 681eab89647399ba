//! Operator inputs
//!
//! A single debounce abstraction ([`DebouncedInput`]) is shared by the
//! direction switch and the momentary buttons; the controllers turn its
//! edges into motion commands.

pub mod debounce;
pub mod direction;
pub mod encoder;
pub mod overrides;

pub use debounce::{DebouncedInput, Debouncer, Edge, Polarity};
pub use direction::{DirectionController, DirectionState};
pub use encoder::QuadratureDecoder;
pub use overrides::{OverrideController, OverrideMode, SpeedSnapshot};

#[cfg(test)]
pub(crate) mod testing;
