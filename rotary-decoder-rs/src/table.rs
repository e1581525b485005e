//! Quadrature transition tables.
//!
//! Each table has one row per decoder state and one column per pin reading
//! (`00`, `01`, `10`, `11`, with bit 0 = pin 1 and bit 1 = pin 2). A cell is a
//! packed byte:
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+
//! | 0 | 0 |CCW|CW |  next state    |
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! Clockwise rotation produces the reading sequence `00 → 01 → 11 → 10 → 00`.
//! Any reading that does not continue the sequence expected by the current
//! row sends the decoder back towards a start row without a flag, so contact
//! bounce is absorbed by the table itself.

use crate::direction::Direction;
use crate::pins::PinReading;

// ---------------------------------------------------------------------------
// Cell layout
// ---------------------------------------------------------------------------

/// Bits of a cell holding the next state index.
pub const STATE_MASK: u8 = 0x0F;

/// Bits of a cell holding the direction flag.
pub const DIRECTION_MASK: u8 = 0x30;

const CW: u8 = Direction::Clockwise.flag();
const CCW: u8 = Direction::CounterClockwise.flag();

/// Row every decoder starts in. Both tables put their rest detent (reading
/// `00`) at row 0.
pub const START: u8 = 0x0;

// ---------------------------------------------------------------------------
// Full-step table (one event per full cycle, emitted at 00)
// ---------------------------------------------------------------------------

mod full {
    pub const CW_FINAL: u8 = 0x1;
    pub const CW_BEGIN: u8 = 0x2;
    pub const CW_NEXT: u8 = 0x3;
    pub const CCW_BEGIN: u8 = 0x4;
    pub const CCW_FINAL: u8 = 0x5;
    pub const CCW_NEXT: u8 = 0x6;
}

/// Full-step transition table.
///
/// A flag is emitted only when the decoder returns to [`START`] after
/// seeing all four readings of a cycle in order.
pub const FULL_STEP_TABLE: [[u8; 4]; 7] = {
    use full::*;
    [
        //  00           01          10          11
        // START
        [START, CW_BEGIN, CCW_BEGIN, START],
        // CW_FINAL
        [START | CW, START, CW_FINAL, CW_NEXT],
        // CW_BEGIN
        [START, CW_BEGIN, START, CW_NEXT],
        // CW_NEXT
        [START, CW_BEGIN, CW_FINAL, CW_NEXT],
        // CCW_BEGIN
        [START, START, CCW_BEGIN, CCW_NEXT],
        // CCW_FINAL
        [START | CCW, CCW_FINAL, START, CCW_NEXT],
        // CCW_NEXT
        [START, CCW_FINAL, CCW_BEGIN, CCW_NEXT],
    ]
};

// ---------------------------------------------------------------------------
// Half-step table (one event per half cycle, emitted at 00 and 11)
// ---------------------------------------------------------------------------

mod half {
    pub const CCW_BEGIN: u8 = 0x1;
    pub const CW_BEGIN: u8 = 0x2;
    /// Mid-cycle detent at reading `11`.
    pub const START_M: u8 = 0x3;
    pub const CW_BEGIN_M: u8 = 0x4;
    pub const CCW_BEGIN_M: u8 = 0x5;
}

/// Half-step transition table.
pub const HALF_STEP_TABLE: [[u8; 4]; 6] = {
    use half::*;
    [
        //  00            01           10           11
        // START
        [START, CW_BEGIN, CCW_BEGIN, START_M],
        // CCW_BEGIN
        [START, START, CCW_BEGIN, START_M | CCW],
        // CW_BEGIN
        [START, CW_BEGIN, START, START_M | CW],
        // START_M
        [START, CCW_BEGIN_M, CW_BEGIN_M, START_M],
        // CW_BEGIN_M
        [START | CW, START_M, CW_BEGIN_M, START_M],
        // CCW_BEGIN_M
        [START | CCW, CCW_BEGIN_M, START_M, START_M],
    ]
};

// ---------------------------------------------------------------------------
// Step granularity
// ---------------------------------------------------------------------------

/// Selects the transition table a decoder is compiled against.
///
/// Implementations must provide a table that is closed under transition:
/// the state nibble of every cell indexes a row of the same table.
pub trait StepMode {
    /// Transition table rows, indexed by state.
    const TABLE: &'static [[u8; 4]];
}

/// One event per full quadrature cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullStep;

impl StepMode for FullStep {
    const TABLE: &'static [[u8; 4]] = &FULL_STEP_TABLE;
}

/// One event per half quadrature cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfStep;

impl StepMode for HalfStep {
    const TABLE: &'static [[u8; 4]] = &HALF_STEP_TABLE;
}

/// Look up the cell for `state` and `reading` and split it into the next
/// state index and the emitted direction.
#[inline]
pub fn transition(table: &[[u8; 4]], state: u8, reading: PinReading) -> (u8, Direction) {
    let cell = table[(state & STATE_MASK) as usize][reading.index()];
    (cell & STATE_MASK, Direction::from_cell(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(bits: u8) -> PinReading {
        PinReading::from_bits_truncate(bits)
    }

    // Walk `readings` from START and collect the emitted flags.
    fn run(table: &[[u8; 4]], readings: &[u8]) -> (u8, usize, usize) {
        let mut state = START;
        let (mut cw, mut ccw) = (0, 0);
        for &bits in readings {
            let (next, dir) = transition(table, state, reading(bits));
            state = next;
            match dir {
                Direction::Clockwise => cw += 1,
                Direction::CounterClockwise => ccw += 1,
                Direction::None => {}
            }
        }
        (state, cw, ccw)
    }

    fn assert_closed(table: &[[u8; 4]]) {
        for (row, cells) in table.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                assert!(
                    ((cell & STATE_MASK) as usize) < table.len(),
                    "row {} col {} points outside the table",
                    row,
                    col
                );
                assert_eq!(cell & !(STATE_MASK | DIRECTION_MASK), 0);
                assert_ne!(cell & DIRECTION_MASK, DIRECTION_MASK);
            }
        }
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn tables_are_closed_under_transition() {
        assert_closed(&FULL_STEP_TABLE);
        assert_closed(&HALF_STEP_TABLE);
    }

    #[test]
    fn full_step_flags_only_on_return_to_start() {
        let mut flagged = 0;
        for cells in FULL_STEP_TABLE.iter() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell & DIRECTION_MASK != 0 {
                    flagged += 1;
                    assert_eq!(cell & STATE_MASK, START);
                    assert_eq!(col, 0b00);
                }
            }
        }
        assert_eq!(flagged, 2);
    }

    #[test]
    fn half_step_flags_only_at_detents() {
        let mut flagged = 0;
        for cells in HALF_STEP_TABLE.iter() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell & DIRECTION_MASK != 0 {
                    flagged += 1;
                    match col {
                        0b00 => assert_eq!(cell & STATE_MASK, START),
                        0b11 => assert_eq!(cell & STATE_MASK, half::START_M),
                        _ => panic!("flag in column {:02b}", col),
                    }
                }
            }
        }
        assert_eq!(flagged, 4);
    }

    #[test]
    fn repeated_reading_never_emits() {
        for table in [&FULL_STEP_TABLE[..], &HALF_STEP_TABLE[..]] {
            for state in 0..table.len() as u8 {
                for bits in 0..4 {
                    let (next, _) = transition(table, state, reading(bits));
                    let (_, dir) = transition(table, next, reading(bits));
                    assert_eq!(dir, Direction::None, "state {} reading {:02b}", state, bits);
                }
            }
        }
    }

    #[test]
    fn rows_reached_on_a_clean_cycle_hold_their_reading() {
        for table in [&FULL_STEP_TABLE[..], &HALF_STEP_TABLE[..]] {
            for cycle in [[0b01, 0b11, 0b10, 0b00], [0b10, 0b11, 0b01, 0b00]] {
                let mut state = START;
                for bits in cycle {
                    state = transition(table, state, reading(bits)).0;
                    assert_eq!(transition(table, state, reading(bits)), (state, Direction::None));
                }
            }
        }
    }

    // ── Sequences ────────────────────────────────────────────────────

    #[test]
    fn full_step_cycles() {
        assert_eq!(run(&FULL_STEP_TABLE, &[0b00, 0b01, 0b11, 0b10, 0b00]), (START, 1, 0));
        assert_eq!(run(&FULL_STEP_TABLE, &[0b00, 0b10, 0b11, 0b01, 0b00]), (START, 0, 1));
    }

    #[test]
    fn full_step_partial_cycle_emits_nothing() {
        assert_eq!(run(&FULL_STEP_TABLE, &[0b01, 0b11, 0b10]), (full::CW_FINAL, 0, 0));
        // Turning back before the final edge.
        assert_eq!(run(&FULL_STEP_TABLE, &[0b01, 0b11, 0b01, 0b00]), (START, 0, 0));
    }

    #[test]
    fn full_step_absorbs_bounce() {
        assert_eq!(
            run(&FULL_STEP_TABLE, &[0b00, 0b01, 0b00, 0b01, 0b11, 0b10, 0b00]),
            (START, 1, 0)
        );
        assert_eq!(
            run(&FULL_STEP_TABLE, &[0b10, 0b11, 0b10, 0b11, 0b01, 0b11, 0b01, 0b00]),
            (START, 0, 1)
        );
    }

    #[test]
    fn skipped_reading_emits_nothing() {
        // 01 -> 10 flips both pins at once.
        assert_eq!(run(&FULL_STEP_TABLE, &[0b01, 0b10, 0b00]), (START, 0, 0));
    }

    #[test]
    fn half_step_cycles() {
        assert_eq!(run(&HALF_STEP_TABLE, &[0b00, 0b01, 0b11, 0b10, 0b00]), (START, 2, 0));
        assert_eq!(run(&HALF_STEP_TABLE, &[0b00, 0b10, 0b11, 0b01, 0b00]), (START, 0, 2));
    }

    #[test]
    fn half_step_emits_at_mid_detent() {
        assert_eq!(run(&HALF_STEP_TABLE, &[0b01, 0b11]), (half::START_M, 1, 0));
    }
}
