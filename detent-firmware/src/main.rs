//! Detent - rotary encoder demo firmware
//!
//! Reads a two-channel quadrature encoder on an RP2040 from GPIO edges.
//! Every confirmed step is logged with its direction, and the current value
//! is reported every few seconds.
//!
//! Pins and bounds come from `encoder.toml`, which is validated by the
//! build script and compiled into the firmware.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use detent_core::config::parse_config;
use detent_core::{DeferredSteps, Encoder};
use detent_hal_rp2040::{pin_bank, EdgeWatcher, EncoderPins};

use crate::channels::{KnobEncoder, STEP_CHANNEL};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit encoder.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../encoder.toml");

// Encoder shared by the edge task and the readers; must live forever
static ENCODER: StaticCell<KnobEncoder> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Detent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => defmt::panic!("Invalid encoder.toml: {}", e),
    };
    info!(
        "Encoder on gpio{} / gpio{}, range {}..={}, start {}",
        config.pins.a.pin,
        config.pins.b.pin,
        config.encoder.min,
        config.encoder.max,
        config.encoder.start
    );

    let mut bank = pin_bank!(p);
    let pins = match EncoderPins::take(&mut bank, &config.pins) {
        Ok(pins) => pins,
        Err(e) => defmt::panic!("Encoder pins unavailable: {}", e),
    };

    let encoder: &'static KnobEncoder = ENCODER.init(Encoder::new(
        config.encoder,
        DeferredSteps::new(&STEP_CHANNEL),
    ));

    let watcher = match EdgeWatcher::new(encoder, pins) {
        Ok(watcher) => watcher,
        Err(_) => defmt::panic!("Failed to arm encoder pins"),
    };

    spawner.spawn(tasks::edge_task(watcher)).unwrap();
    spawner.spawn(tasks::step_log_task(encoder)).unwrap();
    spawner.spawn(tasks::report_task(encoder)).unwrap();

    info!("All tasks spawned, firmware running");
}
