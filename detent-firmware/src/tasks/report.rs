//! Periodic value report

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::KnobEncoder;

/// Report interval in seconds
pub const REPORT_INTERVAL_SECS: u64 = 5;

#[embassy_executor::task]
pub async fn report_task(encoder: &'static KnobEncoder) {
    let mut ticker = Ticker::every(Duration::from_secs(REPORT_INTERVAL_SECS));

    loop {
        ticker.next().await;
        info!("Value is {}", encoder.value());
    }
}
