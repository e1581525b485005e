//! Decoder shared between an interrupt handler and the rest of the firmware.
//!
//! The interrupt handler is the only writer; tasks and the main loop read the
//! counters. Every access runs inside a critical section, so a reader never
//! observes a position from one step and turns from another.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::counter::CounterConfig;
use crate::decoder::RotaryDecoder;
use crate::direction::Direction;
use crate::error::EncoderError;
use crate::pins::{PinReading, TwoPinInput};
use crate::table::{FullStep, StepMode};

/// Position, turns, and last direction read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSnapshot {
    pub position: i32,
    pub turns: i32,
    pub direction: Direction,
}

/// A [`RotaryDecoder`] behind a critical-section mutex.
///
/// `new` is `const`, so the decoder can live in a `static` that the
/// interrupt handler and the application both reach:
///
/// ```ignore
/// static ENCODER: SharedDecoder<FullStep> = SharedDecoder::new(CounterConfig::wrapping(24));
///
/// #[interrupt]
/// fn IO_IRQ_BANK0() {
///     let reading = read_encoder_pins();
///     ENCODER.step(reading);
/// }
///
/// // main loop
/// let position = ENCODER.position();
/// ```
pub struct SharedDecoder<M = FullStep> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<RotaryDecoder<M>>>,
}

impl<M: StepMode> SharedDecoder<M> {
    pub const fn new(config: CounterConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RotaryDecoder::new(config))),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut RotaryDecoder<M>) -> R) -> R {
        self.inner.lock(|decoder| f(&mut decoder.borrow_mut()))
    }

    // ── Writer side ──────────────────────────────────────────────────

    /// Advance the decoder by one reading.
    pub fn step(&self, reading: PinReading) -> Direction {
        self.with(|decoder| decoder.step(reading))
    }

    /// Sample `pins` and advance the decoder.
    ///
    /// The pins are read before the critical section is entered.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if the pins cannot be read
    pub fn process<P: TwoPinInput>(
        &self,
        pins: &mut P,
    ) -> Result<Direction, EncoderError<P::Error>> {
        let reading = pins.read()?;
        Ok(self.step(reading))
    }

    /// Return to the start state and zero both counters.
    pub fn reset(&self) {
        self.with(|decoder| decoder.reset());
    }

    /// Overwrite position and turns without touching the state machine.
    pub fn set_position(&self, position: i32, turns: i32) {
        self.with(|decoder| decoder.set_position(position, turns));
    }

    // ── Reader side ──────────────────────────────────────────────────

    pub fn position(&self) -> i32 {
        self.with(|decoder| decoder.position())
    }

    pub fn turns(&self) -> i32 {
        self.with(|decoder| decoder.turns())
    }

    pub fn direction(&self) -> Direction {
        self.with(|decoder| decoder.direction())
    }

    /// Read all counters in one critical section.
    pub fn snapshot(&self) -> EncoderSnapshot {
        self.with(|decoder| EncoderSnapshot {
            position: decoder.position(),
            turns: decoder.turns(),
            direction: decoder.direction(),
        })
    }
}

impl<M: StepMode> Default for SharedDecoder<M> {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}
