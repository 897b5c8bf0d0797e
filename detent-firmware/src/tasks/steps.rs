//! Step logger task
//!
//! Prints every confirmed step as it is taken off the step channel.

use defmt::*;

use crate::channels::{KnobEncoder, STEP_CHANNEL};

#[embassy_executor::task]
pub async fn step_log_task(encoder: &'static KnobEncoder) {
    info!("Step log task started");

    let mut dropped = 0;

    loop {
        let step = STEP_CHANNEL.receive().await;
        info!("* New value: {}, Direction: {}", step.value, step.direction);

        let now_dropped = encoder.handler().dropped();
        if now_dropped != dropped {
            warn!("{} steps not logged (queue full)", now_dropped.wrapping_sub(dropped));
            dropped = now_dropped;
        }
    }
}
