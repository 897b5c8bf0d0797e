//! Shared encoder state
//!
//! [`Encoder`] wraps the [`Decoder`] so it can be driven from interrupt
//! context while application code reads the value from elsewhere.
//!
//! - Reading, direction and value change together, under one lock, once
//!   per edge. The raw mutex type is the platform's choice:
//!   `CriticalSectionRawMutex` when edges arrive in an interrupt,
//!   `NoopRawMutex` when everything runs in one context.
//! - The value is published through an atomic written under that lock, so
//!   [`Encoder::value`] never blocks and never sees a half-applied step.
//! - The step handler runs last, with all state settled, so a handler
//!   that panics leaves the encoder consistent.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicI32, Ordering};

use super::decoder::{Decoder, EdgeOutcome};
use super::notify::{Step, StepHandler};
use crate::config::{ConfigError, EncoderConfig};
use crate::phase::{Direction, PhaseReading};

/// Quadrature encoder driven by edge notifications
///
/// # Example
///
/// ```
/// use detent_core::{Encoder, EncoderConfig, PhaseReading};
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
///
/// let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
///
/// for reading in [0b01, 0b11, 0b10, 0b00] {
///     encoder.on_edge(PhaseReading::from_bits(reading).unwrap());
/// }
/// assert_eq!(encoder.value(), 1);
/// ```
pub struct Encoder<M: RawMutex, H: StepHandler = ()> {
    decoder: Mutex<M, RefCell<Decoder>>,
    value: AtomicI32,
    config: EncoderConfig,
    handler: H,
}

impl<M: RawMutex, H: StepHandler> Encoder<M, H> {
    /// Create an encoder
    ///
    /// The start value is clamped into the bounds. The reading starts at
    /// rest until [`resync`](Self::resync) seeds it from the pins.
    pub const fn new(config: EncoderConfig, handler: H) -> Self {
        Self {
            decoder: Mutex::new(RefCell::new(Decoder::new(PhaseReading::Rest))),
            value: AtomicI32::new(config.clamp(config.start)),
            config,
            handler,
        }
    }

    /// Create an encoder after validating its bounds
    pub fn try_new(config: EncoderConfig, handler: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, handler))
    }

    /// Feed a freshly sampled reading of both pins
    ///
    /// Call this for every edge on either pin, in delivery order. Returns
    /// what the reading did so the caller can log diagnostics.
    ///
    /// The step handler runs inside the lock: it must not call back into
    /// `on_edge`.
    pub fn on_edge(&self, reading: PhaseReading) -> EdgeOutcome {
        self.decoder.lock(|decoder| {
            let outcome = decoder.borrow_mut().on_edge(reading);

            if let EdgeOutcome::Step(direction) = outcome {
                let value = self.apply(direction);
                self.handler.on_step(Step { value, direction });
            }

            outcome
        })
    }

    /// Current value
    pub fn value(&self) -> i32 {
        self.value.load(Ordering::Acquire)
    }

    /// Overwrite the value
    ///
    /// The new value is clamped into the bounds and returned. The step
    /// handler is not notified.
    pub fn set_value(&self, value: i32) -> i32 {
        let value = self.config.clamp(value);
        self.decoder.lock(|_| self.value.store(value, Ordering::Release));
        value
    }

    /// Seed the reading from a live pin read and forget the direction
    pub fn resync(&self, reading: PhaseReading) {
        self.decoder
            .lock(|decoder| decoder.borrow_mut().resync(reading));
    }

    /// Last processed reading
    pub fn reading(&self) -> PhaseReading {
        self.decoder.lock(|decoder| decoder.borrow().reading())
    }

    /// Current inferred direction
    pub fn direction(&self) -> Direction {
        self.decoder.lock(|decoder| decoder.borrow().direction())
    }

    /// Value bounds
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The registered step handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Apply one step to the value; caller holds the lock
    fn apply(&self, direction: Direction) -> i32 {
        let current = self.value.load(Ordering::Relaxed);
        let value = self.config.clamp(current.saturating_add(direction.delta()));
        self.value.store(value, Ordering::Release);
        value
    }
}
