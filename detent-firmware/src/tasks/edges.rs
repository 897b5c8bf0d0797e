//! Edge watcher task
//!
//! Samples both encoder pins on every edge and feeds the encoder.

use defmt::*;

use crate::channels::KnobWatcher;

#[embassy_executor::task]
pub async fn edge_task(mut watcher: KnobWatcher) {
    info!("Edge task started, value {}", watcher.encoder().value());
    watcher.run().await
}
