//! Millfeed - Mill Power Feed Firmware
//!
//! Main firmware binary for an RP2040 driving the table feed of a manual
//! milling machine with a step/direction stepper driver.
//!
//! Step pulses are timed by a polling loop on the main task. The speed knob
//! runs as its own task and reaches the loop only through a single atomic
//! setpoint.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{block_for, Delay, Duration};
use {defmt_rtt as _, panic_probe as _};

use millfeed_core::config::FeedConfig;
use millfeed_core::context::FeedContext;
use millfeed_core::input::{DirectionController, OverrideController, OverrideMode, Polarity};
use millfeed_core::setpoint::SetpointCell;
use millfeed_core::traits::DisplaySink;
use millfeed_core::units::Velocity;
use millfeed_display::{Hd44780, LcdMessages};
use millfeed_drivers::stepper::MotionEngine;
use millfeed_hal_rp2040::EmbassyClock;

use crate::board::Board;
use crate::feed::Controls;

mod board;
mod feed;
mod tasks;

/// Machine configuration, fixed at build time
const CONFIG: FeedConfig = FeedConfig::DEFAULT;

/// How long the boot banner stays up
const WELCOME_HOLD: Duration = Duration::from_secs(3);

/// Operator setpoint, written by the encoder task only
static SETPOINT: SetpointCell = SetpointCell::new(Velocity::ZERO);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Millfeed firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    if let Err(e) = CONFIG.validate() {
        error!("Invalid feed configuration: {}", e);
        loop {
            cortex_m::asm::wfi();
        }
    }
    let limits = CONFIG.limits();
    info!(
        "Feed config: max {} steps/s, start {} steps/s, min {} us/step",
        limits.max_steps_per_sec, limits.starting_steps_per_sec, limits.min_micros_per_step
    );

    let board = Board::new(p);

    let mut engine = MotionEngine::new(
        FeedContext::new(CONFIG, &SETPOINT),
        board.stepper,
        EmbassyClock,
        Delay,
    );

    let mut lcd = Hd44780::new(board.lcd, Delay);
    lcd.init();
    let mut display = LcdMessages::new(lcd);
    info!("LCD initialized");

    let mut controls = Controls {
        direction: DirectionController::new(
            board.left_throw,
            board.right_throw,
            Polarity::ActiveLow,
            &CONFIG.debounce,
        ),
        rapid: OverrideController::new(
            board.rapid,
            Polarity::ActiveLow,
            OverrideMode::Rapid,
            &CONFIG.debounce,
        ),
        pause: OverrideController::new(
            board.knob_push,
            Polarity::ActiveLow,
            OverrideMode::PauseToggle,
            &CONFIG.debounce,
        ),
    };

    engine.begin();
    info!("Stepper initialized, driver released");

    // Blocks for as long as the direction switch is thrown
    controls.direction.begin(&mut Delay, &mut display);
    info!("Direction switch neutral, feed armed");

    display.welcome_message();
    block_for(WELCOME_HOLD);

    unwrap!(spawner.spawn(tasks::encoder_task(
        board.knob_a,
        board.knob_b,
        &SETPOINT,
        CONFIG
    )));

    info!("Feed loop running");
    feed::run(&mut engine, &mut display, &mut controls, &SETPOINT, EmbassyClock).await;
}
