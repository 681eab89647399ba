//! The polling loop
//!
//! Runs forever on the main task. Each pass is short: at most one ramp
//! tick, one step pulse and a few pin reads. The loop yields once per pass so
//! the encoder task can run between passes.

use embassy_futures::yield_now;
use millfeed_core::input::{DirectionController, OverrideController};
use millfeed_core::setpoint::{SetpointCell, SetpointWatcher};
use millfeed_core::traits::{DisplaySink, FeedDrive};
use millfeed_hal::gpio::InputPin;
use millfeed_hal::time::MonotonicClock;

/// Operator controls polled by the loop
pub struct Controls<L, R, P, K> {
    pub direction: DirectionController<L, R>,
    pub rapid: OverrideController<P>,
    pub pause: OverrideController<K>,
}

/// Run the feed until power-off
pub async fn run<D, S, C, L, R, P, K>(
    drive: &mut D,
    display: &mut S,
    controls: &mut Controls<L, R, P, K>,
    setpoint: &SetpointCell,
    clock: C,
)
where
    D: FeedDrive,
    S: DisplaySink,
    C: MonotonicClock,
    L: InputPin,
    R: InputPin,
    P: InputPin,
    K: InputPin,
{
    let mut watcher = SetpointWatcher::new();

    loop {
        if let Some(velocity) = watcher.poll(setpoint) {
            drive.set_speed(velocity);
            display.write_speed(velocity);
        }

        let now_ms = clock.now_millis();
        controls.direction.poll(now_ms, drive, display);
        controls.rapid.poll(now_ms, drive, display);
        controls.pause.poll(now_ms, drive, display);

        yield_now().await;
    }
}
