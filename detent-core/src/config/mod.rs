//! Encoder configuration
//!
//! Type definitions plus a parser for the text format embedded in the
//! firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin, ParseError};
pub use types::{ConfigError, EncoderConfig, EncoderHwConfig, EncoderPinsConfig, PinConfig};
