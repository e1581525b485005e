//! Bounded position counter with a lap ("turns") count.
//!
//! The counter consumes one [`Direction`] per decoded step. With a bound
//! configured, a step past `±max_position` either clamps
//! ([`Overflow::Saturate`]) or resets the position to zero and records a lap
//! ([`Overflow::Wrap`]).

use crate::direction::Direction;

/// What to do when a step would leave `[-max_position, max_position]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Overflow {
    /// Hold the position at the bound. Turns are never touched.
    #[default]
    Saturate,
    /// Reset the position to zero and count a lap in the step direction.
    Wrap,
}

/// Immutable counter configuration.
///
/// `max_position == 0` means unbounded: the position runs over the whole
/// `i32` range and wraps (two's complement) at its ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CounterConfig {
    max_position: i32,
    overflow: Overflow,
}

impl CounterConfig {
    /// Build a configuration.
    ///
    /// # Panics
    /// If `max_position` is negative. In a `const` or `static` initialiser
    /// this is a compile error, so bind fixed configurations to a `const`:
    ///
    /// ```
    /// use rotary_decoder::CounterConfig;
    ///
    /// const VOLUME: CounterConfig = CounterConfig::saturating(100);
    /// assert!(VOLUME.is_bounded());
    /// ```
    pub const fn new(max_position: i32, overflow: Overflow) -> Self {
        assert!(max_position >= 0, "max_position must not be negative");
        Self {
            max_position,
            overflow,
        }
    }

    /// No bound; position follows every step.
    pub const fn unbounded() -> Self {
        Self::new(0, Overflow::Saturate)
    }

    /// Clamp the position to `[-max_position, max_position]`.
    ///
    /// # Panics
    /// If `max_position` is negative; see [`new`](Self::new).
    pub const fn saturating(max_position: i32) -> Self {
        Self::new(max_position, Overflow::Saturate)
    }

    /// Reset the position to zero and count a lap past `±max_position`.
    ///
    /// # Panics
    /// If `max_position` is negative; see [`new`](Self::new).
    pub const fn wrapping(max_position: i32) -> Self {
        Self::new(max_position, Overflow::Wrap)
    }

    /// Configured bound, `0` if unbounded.
    pub const fn max_position(&self) -> i32 {
        self.max_position
    }

    pub const fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Returns `true` if a bound is configured.
    pub const fn is_bounded(&self) -> bool {
        self.max_position != 0
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Outcome of applying one direction to a [`PositionCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterEvent {
    /// No step was emitted.
    Unchanged,
    /// Position moved by one and stayed within bounds.
    Moved,
    /// Position hit the bound and was held there.
    Clamped,
    /// Position passed the bound, was reset to zero, and a lap was counted.
    Wrapped,
}

/// Position and lap counters driven by decoded steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionCounter {
    config: CounterConfig,
    position: i32,
    turns: i32,
}

impl PositionCounter {
    pub const fn new(config: CounterConfig) -> Self {
        Self {
            config,
            position: 0,
            turns: 0,
        }
    }

    /// Apply one decoded step.
    pub fn apply(&mut self, direction: Direction) -> CounterEvent {
        let delta = direction.delta();
        if delta == 0 {
            return CounterEvent::Unchanged;
        }

        if !self.config.is_bounded() {
            self.position = self.position.wrapping_add(delta);
            return CounterEvent::Moved;
        }

        // Only the bound in the direction of travel is checked, so a position
        // set outside the range walks back towards it one step at a time.
        let max = self.config.max_position;
        let next = self
            .position
            .checked_add(delta)
            .filter(|&next| if delta > 0 { next <= max } else { next >= -max });

        match next {
            Some(next) => {
                self.position = next;
                CounterEvent::Moved
            }
            None => match self.config.overflow {
                Overflow::Saturate => {
                    self.position = if delta > 0 { max } else { -max };
                    debug!("position clamped at {}", self.position);
                    CounterEvent::Clamped
                }
                Overflow::Wrap => {
                    self.position = 0;
                    self.turns = self.turns.wrapping_add(delta);
                    debug!("position wrapped, turns = {}", self.turns);
                    CounterEvent::Wrapped
                }
            },
        }
    }

    /// Overwrite both counters. Values are stored as given.
    pub fn set(&mut self, position: i32, turns: i32) {
        self.position = position;
        self.turns = turns;
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn turns(&self) -> i32 {
        self.turns
    }

    pub fn config(&self) -> CounterConfig {
        self.config
    }
}

impl Default for PositionCounter {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}
