//! GPIO pin abstractions
//!
//! Provides traits for digital input pins that can raise an interrupt on
//! both rising and falling edges. Chip-specific HALs implement these for
//! their pin types.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Any configured inversion (active-low wiring)
/// is applied here, so callers always see the logical level.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the pin as a [`Level`]
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}

/// Input pin that can raise an interrupt on both edges
///
/// Arming is a registration: once `listen_any_edge` succeeds, the platform
/// delivers every rising and falling edge until `unlisten` is called. The
/// handler that runs on an edge is platform glue; it is expected to sample
/// both encoder pins and push the reading into the decoder.
pub trait EdgeInterrupt: InputPin {
    /// Error raised when the interrupt cannot be armed
    type Error;

    /// Enable the interrupt for rising and falling edges
    fn listen_any_edge(&mut self) -> Result<(), Self::Error>;

    /// Disable the interrupt
    ///
    /// Must be safe to call on a pin that is not armed.
    fn unlisten(&mut self);

    /// Check if the interrupt is currently armed
    fn is_listening(&self) -> bool;

    /// Acknowledge a pending edge
    ///
    /// Chips with latched interrupt flags clear them here; the default
    /// does nothing.
    fn clear_interrupt(&mut self) {}
}
