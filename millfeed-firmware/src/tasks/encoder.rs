//! Speed knob task
//!
//! Wakes on every edge of either encoder line, decodes detents and nudges
//! the shared setpoint. This task is the setpoint's only writer.

use defmt::*;
use embassy_futures::select::select;
use millfeed_core::config::FeedConfig;
use millfeed_core::input::QuadratureDecoder;
use millfeed_core::setpoint::SetpointCell;
use millfeed_hal::gpio::InputPin;

use crate::board::In;

/// Encoder task - turns knob detents into setpoint changes
#[embassy_executor::task]
pub async fn encoder_task(
    mut a: In,
    mut b: In,
    setpoint: &'static SetpointCell,
    config: FeedConfig,
) {
    info!("Encoder task started");

    let mut decoder =
        QuadratureDecoder::new(a.is_high(), b.is_high(), config.encoder_steps_per_detent);

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        if let Some(detents) = decoder.update(a.is_high(), b.is_high()) {
            let velocity = setpoint.nudge(detents, config.velocity_increment, config.max_velocity);
            trace!("setpoint {}", velocity);
        }
    }
}
