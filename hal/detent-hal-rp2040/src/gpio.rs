//! Edge-capable encoder pins
//!
//! The RP2040 raises GPIO interrupts through embassy's `Input` futures:
//! awaiting `wait_for_any_edge` enables the edge interrupt for that pin and
//! the executor wakes the task when it fires. [`EdgePin`] layers the
//! arm/disarm registration of `detent_hal::EdgeInterrupt` on top, so an
//! unarmed pin never waits on hardware.

use core::convert::Infallible;
use core::future;

use detent_core::config::{EncoderPinsConfig, PinConfig};
use detent_hal::{EdgeInterrupt, InputPin};
use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;

use crate::pins::{PinBank, PinError};

/// Input pin with optional inversion and edge registration
pub struct EdgePin {
    input: Input<'static>,
    inverted: bool,
    listening: bool,
}

impl EdgePin {
    /// Configure `pin` as an input per `config`
    ///
    /// Pins without the pull-up flag are pulled down, so an idle open
    /// contact reads low.
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::Down };
        Self {
            input: Input::new(pin, pull),
            inverted: config.inverted,
            listening: false,
        }
    }

    /// Wait for the next rising or falling edge
    ///
    /// Never completes while the pin is not armed.
    pub async fn wait_for_edge(&mut self) {
        if self.listening {
            self.input.wait_for_any_edge().await;
        } else {
            future::pending::<()>().await;
        }
    }
}

impl InputPin for EdgePin {
    fn is_high(&self) -> bool {
        self.input.is_high() != self.inverted
    }
}

impl EdgeInterrupt for EdgePin {
    type Error = Infallible;

    fn listen_any_edge(&mut self) -> Result<(), Infallible> {
        self.listening = true;
        Ok(())
    }

    fn unlisten(&mut self) {
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }
}

/// The two channels of one encoder
pub struct EncoderPins {
    pub a: EdgePin,
    pub b: EdgePin,
}

impl EncoderPins {
    /// Take both encoder pins from the bank
    ///
    /// On failure, any pin already taken is returned to the bank.
    pub fn take(bank: &mut PinBank, config: &EncoderPinsConfig) -> Result<Self, PinError> {
        if config.a.pin == config.b.pin {
            return Err(PinError::SamePin);
        }

        let a = bank.take(config.a.pin)?;
        let b = match bank.take(config.b.pin) {
            Ok(b) => b,
            Err(e) => {
                bank.return_pin(config.a.pin, a);
                return Err(e);
            }
        };

        Ok(Self {
            a: EdgePin::new(a, &config.a),
            b: EdgePin::new(b, &config.b),
        })
    }
}
