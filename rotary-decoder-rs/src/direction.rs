//! Rotation direction emitted by the decoder.

use crate::table::DIRECTION_MASK;

/// Direction of a completed step.
///
/// The discriminants are the flag bits stored in the high nibble of each
/// transition table cell, so a cell decodes to a direction with a single
/// mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// No complete step yet.
    #[default]
    None = 0x00,
    /// Clockwise step.
    Clockwise = 0x10,
    /// Counter-clockwise step.
    CounterClockwise = 0x20,
}

impl Direction {
    /// Decode the direction flag of a packed table cell.
    ///
    /// Only the flag bits are inspected. A cell with both flag bits set
    /// cannot appear in a well-formed table and decodes as [`Direction::None`].
    pub const fn from_cell(cell: u8) -> Self {
        match cell & DIRECTION_MASK {
            0x10 => Direction::Clockwise,
            0x20 => Direction::CounterClockwise,
            _ => Direction::None,
        }
    }

    /// The flag bits for this direction.
    pub const fn flag(self) -> u8 {
        self as u8
    }

    /// Returns `true` if no step was emitted.
    pub const fn is_none(self) -> bool {
        matches!(self, Direction::None)
    }

    /// Signed position change for this direction: `+1`, `-1`, or `0`.
    pub const fn delta(self) -> i32 {
        match self {
            Direction::None => 0,
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
