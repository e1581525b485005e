//! Table-driven decoder state machine.

use core::marker::PhantomData;

use crate::counter::{CounterConfig, PositionCounter};
use crate::direction::Direction;
use crate::pins::PinReading;
use crate::table::{transition, FullStep, StepMode, START};

/// Quadrature decoder with a bounded position counter.
///
/// `M` picks the transition table at compile time ([`FullStep`] or
/// [`HalfStep`](crate::HalfStep)). The decoder holds no pins; feed it one
/// [`PinReading`] per observed pin change through [`step`](Self::step).
///
/// # Example
///
/// ```
/// use rotary_decoder::{CounterConfig, Direction, FullStep, PinReading, RotaryDecoder};
///
/// let mut decoder: RotaryDecoder<FullStep> = RotaryDecoder::new(CounterConfig::wrapping(5));
///
/// for bits in [0b01, 0b11, 0b10] {
///     assert_eq!(decoder.step(PinReading::from_bits_truncate(bits)), Direction::None);
/// }
/// assert_eq!(decoder.step(PinReading::from_bits_truncate(0b00)), Direction::Clockwise);
/// assert_eq!(decoder.position(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RotaryDecoder<M = FullStep> {
    state: u8,
    direction: Direction,
    counter: PositionCounter,
    _mode: PhantomData<M>,
}

impl<M: StepMode> RotaryDecoder<M> {
    /// Create a decoder in the start state with both counters at zero.
    pub const fn new(config: CounterConfig) -> Self {
        Self {
            state: START,
            direction: Direction::None,
            counter: PositionCounter::new(config),
            _mode: PhantomData,
        }
    }

    /// Advance the state machine by one pin reading.
    ///
    /// Returns the direction emitted by this transition, which is also
    /// stored as the last direction. A clockwise or counter-clockwise result
    /// has already been applied to the position counter.
    #[inline]
    pub fn step(&mut self, reading: PinReading) -> Direction {
        let (state, direction) = transition(M::TABLE, self.state, reading);
        self.state = state;
        self.direction = direction;

        if !direction.is_none() {
            self.counter.apply(direction);
            trace!("step {}, position {}", direction, self.counter.position());
        }

        direction
    }

    /// Return to the start state and zero both counters.
    pub fn reset(&mut self) {
        self.state = START;
        self.direction = Direction::None;
        self.counter.set(0, 0);
    }

    /// Overwrite position and turns, e.g. after reading an absolute
    /// reference. The state machine keeps its current state.
    pub fn set_position(&mut self, position: i32, turns: i32) {
        self.counter.set(position, turns);
    }

    pub fn position(&self) -> i32 {
        self.counter.position()
    }

    /// Laps counted past the bound. Only moves with [`Overflow::Wrap`](crate::Overflow::Wrap).
    pub fn turns(&self) -> i32 {
        self.counter.turns()
    }

    /// Direction emitted by the most recent [`step`](Self::step).
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current row of the transition table.
    pub fn state(&self) -> u8 {
        self.state
    }

    pub fn config(&self) -> CounterConfig {
        self.counter.config()
    }
}

impl<M: StepMode> Default for RotaryDecoder<M> {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}
