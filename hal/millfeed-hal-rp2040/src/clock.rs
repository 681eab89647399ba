//! Monotonic clock over the embassy time driver

use embassy_time::Instant;
use millfeed_hal::time::MonotonicClock;

/// Clock backed by the RP2040 timer peripheral
///
/// The 64-bit tick count is truncated to `u32`; callers only ever take
/// wrapping differences, so the wrap every ~71 minutes (microseconds) is
/// harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }

    fn now_millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
