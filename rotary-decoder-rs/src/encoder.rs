//! Decoder bound to its pins.
//!
//! [`RotaryEncoder`] owns a [`TwoPinInput`] and a [`RotaryDecoder`] and is
//! meant for a single execution context: call [`process`](RotaryEncoder::process)
//! from the pin-change interrupt or a fast polling loop. When the position is
//! read from another context, use [`SharedDecoder`](crate::SharedDecoder)
//! instead.

use crate::counter::CounterConfig;
use crate::decoder::RotaryDecoder;
use crate::direction::Direction;
use crate::error::EncoderError;
use crate::pins::TwoPinInput;
use crate::table::{FullStep, StepMode};

/// Incremental rotary encoder read from two pins.
///
/// # Example
///
/// ```ignore
/// use rotary_decoder::{CounterConfig, FullStep, PinPair, RotaryEncoder};
///
/// // `a` and `b` are any `embedded-hal` input pins
/// let mut encoder: RotaryEncoder<_, FullStep> =
///     RotaryEncoder::new(PinPair::new(a, b), CounterConfig::wrapping(24));
/// encoder.begin(true)?;
///
/// // In the pin-change interrupt handler:
/// encoder.process()?;
///
/// // Anywhere in the same context:
/// let position = encoder.position();
/// ```
pub struct RotaryEncoder<P, M = FullStep> {
    pins: P,
    decoder: RotaryDecoder<M>,
}

impl<P, M> RotaryEncoder<P, M>
where
    P: TwoPinInput,
    M: StepMode,
{
    /// Create a new encoder.
    ///
    /// No pin traffic is generated. Call [`begin`](Self::begin) before the
    /// first [`process`](Self::process).
    ///
    /// # Arguments
    /// * `pins` — the two encoder pins (takes ownership for exclusive access)
    /// * `config` — position bound and overflow policy
    pub fn new(pins: P, config: CounterConfig) -> Self {
        Self {
            pins,
            decoder: RotaryDecoder::new(config),
        }
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Reset the decoder and configure the pins.
    ///
    /// Zeroes position and turns, returns the state machine to its start
    /// row, optionally enables the weak pull-ups, then enables the
    /// pin-change interrupt.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if either pin hook fails
    pub fn begin(&mut self, pullup: bool) -> Result<(), EncoderError<P::Error>> {
        self.decoder.reset();

        if pullup {
            self.pins.enable_pullups()?;
        }
        self.pins.enable_change_interrupt()?;

        info!("encoder started (max position {})", self.decoder.config().max_position());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Sample the pins and advance the decoder by one reading.
    ///
    /// Call this from the pin-change interrupt handler or a polling loop
    /// that runs faster than the pins can toggle.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if the pins cannot be read; the decoder is
    ///   left untouched
    pub fn process(&mut self) -> Result<Direction, EncoderError<P::Error>> {
        let reading = self.pins.read()?;
        Ok(self.decoder.step(reading))
    }

    // -----------------------------------------------------------------------
    // Counters
    // -----------------------------------------------------------------------

    pub fn position(&self) -> i32 {
        self.decoder.position()
    }

    pub fn turns(&self) -> i32 {
        self.decoder.turns()
    }

    /// Direction emitted by the most recent [`process`](Self::process).
    pub fn direction(&self) -> Direction {
        self.decoder.direction()
    }

    /// Overwrite position and turns without touching the state machine.
    pub fn set_position(&mut self, position: i32, turns: i32) {
        self.decoder.set_position(position, turns);
    }

    pub fn decoder(&self) -> &RotaryDecoder<M> {
        &self.decoder
    }

    /// Mutable access to the pins, e.g. to clear a pending interrupt flag.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Give the pins back.
    pub fn release(self) -> P {
        self.pins
    }
}
