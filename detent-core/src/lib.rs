//! Board-agnostic quadrature encoder decoding
//!
//! This crate contains everything about reading a rotary encoder that does
//! not depend on a specific chip:
//!
//! - Phase readings and the Gray-code cycle they form
//! - Decoding state machine with structural debounce and missed-edge recovery
//! - Lock-guarded encoder safe to drive from interrupt context
//! - Step notification, synchronous or deferred to a task
//! - Scoped interrupt binding over `detent-hal` pins
//! - Configuration type definitions and parsing

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod phase;

pub use config::{EncoderConfig, PinConfig};
pub use encoder::{DeferredSteps, EdgeOutcome, Encoder, EncoderBinding, Step, StepHandler};
pub use phase::{Direction, PhaseReading};
