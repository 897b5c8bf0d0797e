//! Async edge watcher
//!
//! Runs the encoder off GPIO edges in an embassy task: wait for an edge on
//! either pin, then sample both and feed the reading to the encoder.
//! Awaiting an edge discards edges latched before the wait started, so an
//! edge that lands while the previous one is being serviced is lost. Before
//! waiting, the watcher compares the pins with the last processed reading
//! and services the difference straight away.

use detent_core::encoder::{BindError, EdgeOutcome, EncoderBinding};
use detent_core::{Encoder, StepHandler};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::RawMutex;

#[cfg(feature = "defmt")]
use defmt::*;

use crate::gpio::{EdgePin, EncoderPins};

/// Encoder bound to two RP2040 pins
pub struct EdgeWatcher<'e, M: RawMutex, H: StepHandler> {
    binding: EncoderBinding<'e, EdgePin, EdgePin, M, H>,
}

impl<'e, M: RawMutex, H: StepHandler> EdgeWatcher<'e, M, H> {
    /// Seed `encoder` from the pins and arm both of them
    pub fn new(
        encoder: &'e Encoder<M, H>,
        pins: EncoderPins,
    ) -> Result<Self, BindError<core::convert::Infallible>> {
        let binding = EncoderBinding::attach(encoder, pins.a, pins.b)?;

        #[cfg(feature = "defmt")]
        debug!("Encoder armed at reading {}", encoder.reading());

        Ok(Self { binding })
    }

    /// The watched encoder
    pub fn encoder(&self) -> &'e Encoder<M, H> {
        self.binding.encoder()
    }

    /// Wait for one edge on either pin and process it
    ///
    /// Returns without waiting if the pins already differ from the last
    /// processed reading.
    pub async fn next_edge(&mut self) -> EdgeOutcome {
        if self.binding.is_stale() {
            #[cfg(feature = "defmt")]
            trace!("Catching up on a missed edge");
        } else {
            let (a, b) = self.binding.pins_mut();
            select(a.wait_for_edge(), b.wait_for_edge()).await;
        }

        let outcome = self.binding.service();

        #[cfg(feature = "defmt")]
        match outcome {
            EdgeOutcome::Unresolved => debug!("Dropped jump with unknown direction"),
            EdgeOutcome::Skipped => trace!("Missed edge away from rest"),
            EdgeOutcome::Step(direction) => {
                trace!("Step {} -> {}", direction, self.binding.encoder().value())
            }
            EdgeOutcome::Duplicate | EdgeOutcome::Moved => {}
        }

        outcome
    }

    /// Process edges forever
    pub async fn run(&mut self) -> ! {
        loop {
            self.next_edge().await;
        }
    }
}
