//! Quadrature decoding state machine
//!
//! Consumes phase readings in the order edges were delivered and reports
//! confirmed detent-to-detent steps. The machine has no timers: bounce is
//! absorbed structurally because a step is only confirmed when the knob
//! lands back on the rest reading via a leg that agrees with the direction
//! it was already travelling.

use crate::phase::{Direction, PhaseReading, Transition};

/// Result of feeding one reading to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Reading equals the current one (coalesced edges); nothing changed
    Duplicate,
    /// Adjacent move, no step completed
    Moved,
    /// Diagonal jump bridged using the known direction, no step completed
    Skipped,
    /// Diagonal jump with no direction history; dropped as noise
    Unresolved,
    /// A full cycle completed in this direction
    Step(Direction),
}

impl EdgeOutcome {
    /// Direction of the confirmed step, if any
    pub fn step(self) -> Option<Direction> {
        match self {
            EdgeOutcome::Step(direction) => Some(direction),
            _ => None,
        }
    }
}

/// Decoder state: last reading and inferred direction
///
/// This is the lock-free core of [`Encoder`](super::Encoder). It has no
/// notion of pins, values or callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoder {
    reading: PhaseReading,
    direction: Direction,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(PhaseReading::Rest)
    }
}

impl Decoder {
    /// Create a decoder seeded with a live reading
    pub const fn new(reading: PhaseReading) -> Self {
        Self {
            reading,
            direction: Direction::Unknown,
        }
    }

    /// Last processed reading
    pub fn reading(&self) -> PhaseReading {
        self.reading
    }

    /// Current inferred direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Re-seed from a fresh pin read and forget the direction
    pub fn resync(&mut self, reading: PhaseReading) {
        self.reading = reading;
        self.direction = Direction::Unknown;
    }

    /// Process one reading
    ///
    /// This is the core transition logic. At most one step is reported
    /// per call, and only when `reading` is the rest reading.
    pub fn on_edge(&mut self, reading: PhaseReading) -> EdgeOutcome {
        let outcome = match self.reading.transition_to(reading) {
            Transition::Same => return EdgeOutcome::Duplicate,

            Transition::Adjacent(leg) => {
                let confirmed = reading.is_rest() && self.direction == leg;
                self.direction = leg;
                if confirmed {
                    EdgeOutcome::Step(leg)
                } else {
                    EdgeOutcome::Moved
                }
            }

            // The jump went through the reading one quarter step along the
            // known direction, so the final leg is in that direction too.
            // Direction stays as it is.
            Transition::Diagonal => match self.direction {
                Direction::Unknown => EdgeOutcome::Unresolved,
                known if reading.is_rest() => EdgeOutcome::Step(known),
                _ => EdgeOutcome::Skipped,
            },
        };

        self.reading = reading;
        outcome
    }
}
