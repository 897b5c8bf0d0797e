//! Configuration type definitions
//!
//! These types describe an encoder: which pins it is wired to and how its
//! accumulated value is bounded.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value bounds and start position of an encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Value before the first step
    pub start: i32,
    /// Lowest value a step can reach
    pub min: i32,
    /// Highest value a step can reach
    pub max: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl EncoderConfig {
    /// Start at zero with the full `i32` range
    pub const UNBOUNDED: Self = Self {
        start: 0,
        min: i32::MIN,
        max: i32::MAX,
    };

    /// Create a bounded config starting at `start`
    pub const fn bounded(min: i32, max: i32, start: i32) -> Self {
        Self { start, min, max }
    }

    /// Check bounds consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange);
        }
        if self.start < self.min || self.start > self.max {
            return Err(ConfigError::StartOutOfRange);
        }
        Ok(())
    }

    /// Clamp a value into `[min, max]`
    ///
    /// Usable before validation: an inverted range pins everything to `min`.
    pub const fn clamp(&self, value: i32) -> i32 {
        if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}

/// Encoder configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min` is greater than `max`
    InvalidRange,
    /// `start` lies outside `[min, max]`
    StartOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidRange => write!(f, "min must not exceed max"),
            ConfigError::StartOutOfRange => write!(f, "start value outside min..=max"),
        }
    }
}

/// GPIO pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up (pull-down otherwise)
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// The two channel pins of one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderPinsConfig {
    /// Channel A (the left contact on most knobs)
    pub a: PinConfig,
    /// Channel B
    pub b: PinConfig,
}

/// Complete hardware description of one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderHwConfig {
    pub pins: EncoderPinsConfig,
    pub encoder: EncoderConfig,
}
