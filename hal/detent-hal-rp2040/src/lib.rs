//! RP2040-specific HAL for Detent encoder input
//!
//! This crate provides RP2040 implementations of the `detent-hal` traits,
//! plus the glue that drives a `detent-core` encoder from GPIO edges:
//!
//! - Config-driven pin ownership by GPIO number
//! - Edge-capable input pins with optional inversion
//! - An async watcher that services the encoder on every edge

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;
pub mod watcher;

pub use gpio::{EdgePin, EncoderPins};
pub use pins::{PinBank, PinError, GPIO_COUNT};
pub use watcher::EdgeWatcher;
