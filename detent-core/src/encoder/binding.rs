//! Interrupt binding between two pins and an encoder
//!
//! [`EncoderBinding`] is the scoped registration of an encoder with the
//! hardware. Attaching seeds the encoder from a live read and arms both
//! pins; dropping the binding disarms them again on every exit path, so no
//! interrupt can reach an encoder that is gone.

use core::fmt;

use detent_hal::EdgeInterrupt;
use embassy_sync::blocking_mutex::raw::RawMutex;

use super::decoder::EdgeOutcome;
use super::notify::StepHandler;
use super::shared::Encoder;
use crate::phase::PhaseReading;

/// Failure to arm an encoder pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindError<E> {
    /// Channel A could not be armed
    PinA(E),
    /// Channel B could not be armed
    PinB(E),
}

impl<E: fmt::Debug> fmt::Display for BindError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BindError::PinA(e) => write!(f, "cannot arm pin A: {:?}", e),
            BindError::PinB(e) => write!(f, "cannot arm pin B: {:?}", e),
        }
    }
}

/// Both encoder pins armed and routed to an [`Encoder`]
pub struct EncoderBinding<'e, A, B, M, H>
where
    A: EdgeInterrupt,
    B: EdgeInterrupt<Error = A::Error>,
    M: RawMutex,
    H: StepHandler,
{
    encoder: &'e Encoder<M, H>,
    pin_a: A,
    pin_b: B,
}

impl<'e, A, B, M, H> EncoderBinding<'e, A, B, M, H>
where
    A: EdgeInterrupt,
    B: EdgeInterrupt<Error = A::Error>,
    M: RawMutex,
    H: StepHandler,
{
    /// Arm both edge interrupts and seed `encoder` from the pins
    ///
    /// The pins are sampled after arming, so an edge during attach is
    /// either in the seed or delivered later. Nothing stays armed on
    /// failure.
    pub fn attach(
        encoder: &'e Encoder<M, H>,
        mut pin_a: A,
        mut pin_b: B,
    ) -> Result<Self, BindError<A::Error>> {
        pin_a.listen_any_edge().map_err(BindError::PinA)?;
        if let Err(e) = pin_b.listen_any_edge() {
            pin_a.unlisten();
            return Err(BindError::PinB(e));
        }

        let binding = Self {
            encoder,
            pin_a,
            pin_b,
        };
        encoder.resync(binding.sample());
        Ok(binding)
    }

    /// Handle an edge on either pin
    ///
    /// Call from the edge interrupt (or the task awaiting it). Both pins
    /// are sampled together regardless of which one fired.
    pub fn service(&mut self) -> EdgeOutcome {
        self.pin_a.clear_interrupt();
        self.pin_b.clear_interrupt();
        self.encoder.on_edge(self.sample())
    }

    /// Read both pins without touching the encoder
    pub fn sample(&self) -> PhaseReading {
        PhaseReading::from_levels(self.pin_a.is_high(), self.pin_b.is_high())
    }

    /// Check if the pins have moved past the last processed reading
    ///
    /// True when an edge was lost, e.g. one that fired while the previous
    /// edge was being serviced. Call [`service`](Self::service) without
    /// waiting for another edge to catch up.
    pub fn is_stale(&self) -> bool {
        self.sample() != self.encoder.reading()
    }

    /// The bound encoder
    pub fn encoder(&self) -> &'e Encoder<M, H> {
        self.encoder
    }

    /// Mutable access to both pins, e.g. to await their next edge
    pub fn pins_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.pin_a, &mut self.pin_b)
    }
}

impl<A, B, M, H> Drop for EncoderBinding<'_, A, B, M, H>
where
    A: EdgeInterrupt,
    B: EdgeInterrupt<Error = A::Error>,
    M: RawMutex,
    H: StepHandler,
{
    fn drop(&mut self) {
        self.pin_a.unlisten();
        self.pin_b.unlisten();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use detent_hal::InputPin;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use crate::config::EncoderConfig;

    /// Pin whose level and arm state are shared with the test
    struct MockPin<'a> {
        level: &'a Cell<bool>,
        armed: &'a Cell<bool>,
        cleared: &'a Cell<u32>,
        fail: bool,
        toggle_on_arm: bool,
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    impl EdgeInterrupt for MockPin<'_> {
        type Error = ();

        fn listen_any_edge(&mut self) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            if self.toggle_on_arm {
                self.level.set(!self.level.get());
            }
            self.armed.set(true);
            Ok(())
        }

        fn unlisten(&mut self) {
            self.armed.set(false);
        }

        fn is_listening(&self) -> bool {
            self.armed.get()
        }

        fn clear_interrupt(&mut self) {
            self.cleared.set(self.cleared.get() + 1);
        }
    }

    struct Wires {
        a: Cell<bool>,
        b: Cell<bool>,
        a_armed: Cell<bool>,
        b_armed: Cell<bool>,
        cleared: Cell<u32>,
    }

    impl Wires {
        fn new(a: bool, b: bool) -> Self {
            Self {
                a: Cell::new(a),
                b: Cell::new(b),
                a_armed: Cell::new(false),
                b_armed: Cell::new(false),
                cleared: Cell::new(0),
            }
        }

        fn pins(&self, fail_b: bool) -> (MockPin<'_>, MockPin<'_>) {
            (
                MockPin {
                    level: &self.a,
                    armed: &self.a_armed,
                    cleared: &self.cleared,
                    fail: false,
                    toggle_on_arm: false,
                },
                MockPin {
                    level: &self.b,
                    armed: &self.b_armed,
                    cleared: &self.cleared,
                    fail: fail_b,
                    toggle_on_arm: false,
                },
            )
        }

        fn set(&self, reading: PhaseReading) {
            self.a.set(reading.a());
            self.b.set(reading.b());
        }
    }

    #[test]
    fn test_attach_seeds_and_arms() {
        let wires = Wires::new(true, true);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(false);

        let binding = EncoderBinding::attach(&encoder, a, b).unwrap();

        assert_eq!(encoder.reading(), PhaseReading::Both);
        assert!(wires.a_armed.get());
        assert!(wires.b_armed.get());
        assert_eq!(binding.sample(), PhaseReading::Both);
    }

    #[test]
    fn test_service_drives_encoder() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(false);
        let mut binding = EncoderBinding::attach(&encoder, a, b).unwrap();

        let mut outcome = EdgeOutcome::Duplicate;
        for reading in [PhaseReading::B, PhaseReading::Both, PhaseReading::A, PhaseReading::Rest] {
            wires.set(reading);
            outcome = binding.service();
        }

        assert_eq!(outcome.step(), Some(crate::phase::Direction::Clockwise));
        assert_eq!(binding.encoder().value(), 1);
        assert_eq!(wires.cleared.get(), 8);
    }

    #[test]
    fn test_drop_disarms_both_pins() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(false);

        {
            let mut binding = EncoderBinding::attach(&encoder, a, b).unwrap();
            let (a, b) = binding.pins_mut();
            assert!(a.is_listening() && b.is_listening());
        }

        assert!(!wires.a_armed.get());
        assert!(!wires.b_armed.get());
    }

    #[test]
    fn test_failed_attach_leaves_nothing_armed() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(true);

        let result = EncoderBinding::attach(&encoder, a, b);

        assert!(matches!(result, Err(BindError::PinB(()))));
        assert!(!wires.a_armed.get());
        assert!(!wires.b_armed.get());
    }

    #[test]
    fn test_attach_seeds_after_arming() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, mut b) = wires.pins(false);
        // B changes level while the interrupts are being armed
        b.toggle_on_arm = true;

        let binding = EncoderBinding::attach(&encoder, a, b).unwrap();

        assert_eq!(binding.sample(), PhaseReading::B);
        assert_eq!(encoder.reading(), PhaseReading::B);
        assert!(!binding.is_stale());
    }

    #[test]
    fn test_lost_edge_into_rest_is_caught_up() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(false);
        let mut binding = EncoderBinding::attach(&encoder, a, b).unwrap();

        for reading in [PhaseReading::B, PhaseReading::Both, PhaseReading::A] {
            wires.set(reading);
            binding.service();
        }
        assert!(!binding.is_stale());

        // The edge back to rest fires while nobody is waiting for it
        wires.set(PhaseReading::Rest);
        assert!(binding.is_stale());

        assert_eq!(binding.service().step(), Some(crate::phase::Direction::Clockwise));
        assert_eq!(encoder.value(), 1);
        assert!(!binding.is_stale());
    }

    #[test]
    fn test_lost_edge_without_catch_up_drops_detent() {
        let wires = Wires::new(false, false);
        let encoder: Encoder<NoopRawMutex> = Encoder::new(EncoderConfig::UNBOUNDED, ());
        let (a, b) = wires.pins(false);
        let mut binding = EncoderBinding::attach(&encoder, a, b).unwrap();

        for reading in [PhaseReading::B, PhaseReading::Both, PhaseReading::A] {
            wires.set(reading);
            binding.service();
        }

        // Rest is passed through unseen and the next edge lands on B
        wires.set(PhaseReading::Rest);
        wires.set(PhaseReading::B);

        assert_eq!(binding.service(), EdgeOutcome::Skipped);
        assert_eq!(encoder.value(), 0);
    }
}
