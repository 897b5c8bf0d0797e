//! Encoder configuration text parser
//!
//! Parses the small TOML subset used by `encoder.toml`. Allocation free, so
//! the firmware can parse the embedded file at boot.
//!
//! ```toml
//! [encoder]
//! pin_a = "^gpio26"   # ^ = pull-up, ! = inverted (active-low)
//! pin_b = "^gpio19"
//! min = 0
//! max = 100
//! start = 0
//! ```
//!
//! Supported: one `[encoder]` section, `key = value` pairs with string or
//! integer values, `#` comments. `min`, `max` and `start` are optional and
//! default to an unbounded encoder starting at zero.

use core::fmt;

use super::types::{ConfigError, EncoderConfig, EncoderHwConfig, EncoderPinsConfig, PinConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header other than `[encoder]`, or a key outside any section
    InvalidSection,
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue,
    /// Key not recognised in the `[encoder]` section
    UnknownKey,
    /// Invalid pin string
    InvalidPin,
    /// Required key not present
    MissingKey(&'static str),
    /// Bounds are inconsistent
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(error: ConfigError) -> Self {
        ParseError::Config(error)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::InvalidSection => write!(f, "expected an [encoder] section"),
            ParseError::InvalidValue => write!(f, "invalid value"),
            ParseError::UnknownKey => write!(f, "unknown key in [encoder]"),
            ParseError::InvalidPin => write!(f, "invalid pin (expected \"gpioN\")"),
            ParseError::MissingKey(key) => write!(f, "missing required key '{}'", key),
            ParseError::Config(e) => write!(f, "invalid bounds: {}", e),
        }
    }
}

/// Parse encoder configuration text
pub fn parse_config(input: &str) -> Result<EncoderHwConfig, ParseError> {
    let mut in_section = false;
    let mut pin_a: Option<PinConfig> = None;
    let mut pin_b: Option<PinConfig> = None;
    let mut encoder = EncoderConfig::UNBOUNDED;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != "encoder" || in_section {
                return Err(ParseError::InvalidSection);
            }
            in_section = true;
            continue;
        }

        if !in_section {
            return Err(ParseError::InvalidSection);
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match key {
            "pin_a" => pin_a = Some(parse_pin(value)?),
            "pin_b" => pin_b = Some(parse_pin(value)?),
            "min" => encoder.min = parse_int(value)?,
            "max" => encoder.max = parse_int(value)?,
            "start" => encoder.start = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        }
    }

    if !in_section {
        return Err(ParseError::InvalidSection);
    }

    let pins = EncoderPinsConfig {
        a: pin_a.ok_or(ParseError::MissingKey("pin_a"))?,
        b: pin_b.ok_or(ParseError::MissingKey("pin_b"))?,
    };

    encoder.validate()?;

    Ok(EncoderHwConfig { pins, encoder })
}

/// Split `key = value`, dropping trailing comments
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments outside quotes
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio26", "!gpio19", "^gpio4"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut pin = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    pin.pin = number.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(pin)
}
