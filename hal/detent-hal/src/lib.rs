//! Detent Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits an encoder binding
//! needs from a chip-specific HAL. The decoding logic in `detent-core` only
//! talks to these traits, so the same state machine runs on any chip that
//! can read a pin level and raise an interrupt on both edges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (detent-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  detent-core (decoder, binding)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  detent-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  detent-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Read the logic level of a pin
//! - [`gpio::EdgeInterrupt`] - Arm and disarm both-edge interrupts

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key traits at crate root for convenience
pub use gpio::{EdgeInterrupt, InputPin, Level};
