//! Table-driven quadrature decoder for incremental rotary encoders.
//!
//! This crate turns the two-bit signal of a mechanical or optical rotary
//! encoder into debounced clockwise / counter-clockwise steps, and keeps a
//! bounded position counter with an optional lap count.
//!
//! # Architecture
//!
//! The crate is split into three layers:
//!
//! - **[`table`]** — static transition tables for full-step and half-step
//!   decoding. Contact bounce is absorbed by the table, not by timing.
//! - **[`RotaryDecoder`]** — the state machine plus a [`PositionCounter`]
//!   that saturates or wraps at a configured bound. Pure, no I/O.
//! - **Pin layer** — [`TwoPinInput`] and its implementations, the
//!   single-context [`RotaryEncoder`], the interrupt-safe [`SharedDecoder`],
//!   and (with the `task` feature) async edge waiting.
//!
//! # Quick start
//!
//! ```ignore
//! use rotary_decoder::{CounterConfig, FullStep, PinPair, RotaryEncoder};
//!
//! // Construct with any two `embedded-hal` input pins
//! let mut encoder: RotaryEncoder<_, FullStep> =
//!     RotaryEncoder::new(PinPair::new(pin_a, pin_b), CounterConfig::wrapping(24));
//! encoder.begin(true)?;
//!
//! // With async pins, wait for each completed step
//! let direction = encoder.wait_for_rotation().await?;
//! ```
//!
//! # Counter width
//!
//! Position and turns are `i32`. An unbounded counter wraps at the ends of
//! the `i32` range; pick a bound if that matters for your encoder.
//!
//! # Features
//!
//! - **`task`** *(default)* — async edge waiting via `embedded-hal-async`.
//! - **`defmt`** — [`defmt::Format`] implementations and internal logging.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

mod counter;
mod decoder;
mod direction;
mod encoder;
mod error;
mod pins;
mod shared;
pub mod table;
#[cfg(feature = "task")]
mod task;

pub use counter::{CounterConfig, CounterEvent, Overflow, PositionCounter};
pub use decoder::RotaryDecoder;
pub use direction::Direction;
pub use encoder::RotaryEncoder;
pub use error::EncoderError;
pub use pins::{PinPair, PinReading, PortPins, TwoPinInput};
pub use shared::{EncoderSnapshot, SharedDecoder};
pub use table::{FullStep, HalfStep, StepMode};
#[cfg(feature = "task")]
pub use task::monitor;
