//! Error types for the pin-facing side of the decoder.
//!
//! Decoding itself cannot fail; only sampling or configuring the pins can.

use core::fmt;

/// Errors that can occur when driving an encoder from its pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError<E> {
    /// Underlying pin error.
    Pin(E),
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for EncoderError<E> {
    fn from(error: E) -> Self {
        EncoderError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Pin(e) => write!(f, "pin error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Pin(e) => defmt::write!(f, "pin error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_pin_error() {
        let err: EncoderError<u8> = 7u8.into();
        assert_eq!(err, EncoderError::Pin(7));
        assert_eq!(format!("{}", err), "pin error: 7");
    }
}
