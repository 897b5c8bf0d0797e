//! Phase readings and rotation direction
//!
//! A quadrature encoder drives two channels, A and B, a quarter cycle
//! apart. Sampling both at once gives one of four readings which form a
//! Gray-code cycle:
//!
//! ```text
//! Clockwise:         00 -> 01 -> 11 -> 10 -> 00
//! Counter-clockwise: 00 -> 10 -> 11 -> 01 -> 00
//! ```
//!
//! Bit 1 is channel A and bit 0 is channel B. `00` is the detent (rest)
//! position of the knob.

/// Simultaneous logic levels of both encoder channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PhaseReading {
    /// A low, B low (detent)
    Rest = 0b00,
    /// A low, B high
    B = 0b01,
    /// A high, B high
    Both = 0b11,
    /// A high, B low
    A = 0b10,
}

/// Rotation direction inferred from the last adjacent transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// No adjacent transition seen yet
    #[default]
    Unknown,
    Clockwise,
    CounterClockwise,
}

/// Classification of a move between two readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Both readings are equal
    Same,
    /// Neighbours in the cycle, traversed in the given direction
    Adjacent(Direction),
    /// Opposite corners of the cycle (00/11 or 01/10); an edge was missed
    Diagonal,
}

impl PhaseReading {
    /// All readings in clockwise order, starting at rest
    pub const CYCLE: [PhaseReading; 4] = [
        PhaseReading::Rest,
        PhaseReading::B,
        PhaseReading::Both,
        PhaseReading::A,
    ];

    /// Build a reading from the levels of channel A and channel B
    pub const fn from_levels(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => PhaseReading::Rest,
            (false, true) => PhaseReading::B,
            (true, true) => PhaseReading::Both,
            (true, false) => PhaseReading::A,
        }
    }

    /// Parse a raw two-bit value (`0b_AB`)
    ///
    /// Returns `None` for values above `0b11`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(PhaseReading::Rest),
            0b01 => Some(PhaseReading::B),
            0b11 => Some(PhaseReading::Both),
            0b10 => Some(PhaseReading::A),
            _ => None,
        }
    }

    /// Raw two-bit value (`0b_AB`)
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Level of channel A
    pub const fn a(self) -> bool {
        self.bits() & 0b10 != 0
    }

    /// Level of channel B
    pub const fn b(self) -> bool {
        self.bits() & 0b01 != 0
    }

    /// Check if this is the detent reading (`00`)
    pub const fn is_rest(self) -> bool {
        matches!(self, PhaseReading::Rest)
    }

    /// Position in the clockwise cycle
    const fn index(self) -> u8 {
        match self {
            PhaseReading::Rest => 0,
            PhaseReading::B => 1,
            PhaseReading::Both => 2,
            PhaseReading::A => 3,
        }
    }

    /// The neighbouring reading one quarter step in `direction`
    ///
    /// `Direction::Unknown` returns `self`.
    pub const fn next(self, direction: Direction) -> Self {
        let offset = match direction {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => 3,
            Direction::Unknown => 0,
        };
        Self::CYCLE[((self.index() + offset) % 4) as usize]
    }

    /// Classify the move from `self` to `to`
    pub const fn transition_to(self, to: PhaseReading) -> Transition {
        match (to.index() + 4 - self.index()) % 4 {
            0 => Transition::Same,
            1 => Transition::Adjacent(Direction::Clockwise),
            3 => Transition::Adjacent(Direction::CounterClockwise),
            _ => Transition::Diagonal,
        }
    }
}

impl Direction {
    /// Signed value change for a step in this direction (-1, 0 or +1)
    pub const fn delta(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
            Direction::Unknown => 0,
        }
    }
}
