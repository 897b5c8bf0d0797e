//! Config-driven pin ownership
//!
//! Encoder pins come from `encoder.toml` as GPIO numbers, so the firmware
//! moves every GPIO into a [`PinBank`] at boot and takes them back out by
//! number once the config has been parsed.

use core::fmt;

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

/// Number of user GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Build a [`PinBank`] from the embassy `Peripherals`
///
/// Moves `PIN_0` to `PIN_29` out of `$p`; the remaining peripherals stay
/// usable.
///
/// Usage:
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let mut bank = pin_bank!(p);
/// let pin = bank.take(26)?;
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:expr) => {
        $crate::pins::PinBank::new([
            $p.PIN_0.into(),
            $p.PIN_1.into(),
            $p.PIN_2.into(),
            $p.PIN_3.into(),
            $p.PIN_4.into(),
            $p.PIN_5.into(),
            $p.PIN_6.into(),
            $p.PIN_7.into(),
            $p.PIN_8.into(),
            $p.PIN_9.into(),
            $p.PIN_10.into(),
            $p.PIN_11.into(),
            $p.PIN_12.into(),
            $p.PIN_13.into(),
            $p.PIN_14.into(),
            $p.PIN_15.into(),
            $p.PIN_16.into(),
            $p.PIN_17.into(),
            $p.PIN_18.into(),
            $p.PIN_19.into(),
            $p.PIN_20.into(),
            $p.PIN_21.into(),
            $p.PIN_22.into(),
            $p.PIN_23.into(),
            $p.PIN_24.into(),
            $p.PIN_25.into(),
            $p.PIN_26.into(),
            $p.PIN_27.into(),
            $p.PIN_28.into(),
            $p.PIN_29.into(),
        ])
    };
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Both encoder channels configured on the same pin
    SamePin,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PinError::InvalidPin => write!(f, "pin number out of range"),
            PinError::AlreadyTaken => write!(f, "pin already taken"),
            PinError::SamePin => write!(f, "encoder channels share a pin"),
        }
    }
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Create a pin bank owning every GPIO
    ///
    /// Index `n` must hold `PIN_n`; [`pin_bank!`](crate::pin_bank) builds
    /// the array in that order.
    pub fn new(pins: [Peri<'static, AnyPin>; GPIO_COUNT]) -> Self {
        Self {
            pins: pins.map(Some),
        }
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin)?
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Return a pin to the bank
    pub fn return_pin(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        if let Some(slot) = self.pins.get_mut(pin_num as usize) {
            *slot = Some(pin);
        }
    }
}
