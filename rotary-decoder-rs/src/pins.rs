//! Two-pin digital input feeding the decoder.
//!
//! The decoder only ever sees a [`PinReading`]. Anything that can produce
//! one implements [`TwoPinInput`]: a pair of `embedded-hal` input pins
//! ([`PinPair`]) or a raw port register read through a closure
//! ([`PortPins`]).

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

/// Instantaneous logic levels of the two encoder pins.
///
/// Bit 0 is pin 1, bit 1 is pin 2. Always in `0..=3`, so it indexes a
/// transition table column without a bounds check failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinReading(u8);

impl PinReading {
    /// Build a reading from the two pin levels (`true` = high).
    pub const fn from_levels(pin1: bool, pin2: bool) -> Self {
        Self(((pin2 as u8) << 1) | pin1 as u8)
    }

    /// Build a reading from a 2-bit value, or `None` if `bits > 0b11`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits > 0b11 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Build a reading from the low two bits of `bits`, ignoring the rest.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Extract a reading from a port register value.
    ///
    /// Each mask selects the bit of `port` wired to that encoder pin. A pin
    /// reads high if any bit under its mask is set.
    pub const fn from_port(port: u8, pin1_mask: u8, pin2_mask: u8) -> Self {
        Self::from_levels(port & pin1_mask != 0, port & pin2_mask != 0)
    }

    /// The raw 2-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source of [`PinReading`]s for an encoder.
///
/// `enable_pullups` and `enable_change_interrupt` are optional platform
/// configuration hooks. The defaults do nothing, which suits HALs that set
/// pull resistors and edge detection when the pin is constructed.
pub trait TwoPinInput {
    /// Error raised by the underlying pins.
    type Error;

    /// Sample both pins.
    fn read(&mut self) -> Result<PinReading, Self::Error>;

    /// Switch on weak pull-ups on both pins.
    fn enable_pullups(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Arrange for a pin-change interrupt on either pin.
    fn enable_change_interrupt(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// embedded-hal pin pair
// ---------------------------------------------------------------------------

/// Two `embedded-hal` input pins read as one encoder.
///
/// Both pins must share an error type; on most HALs this is
/// [`Infallible`].
pub struct PinPair<A, B> {
    pin1: A,
    pin2: B,
}

impl<A, B> PinPair<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    /// Wrap the pins. `pin1` lands in bit 0 of every reading.
    pub fn new(pin1: A, pin2: B) -> Self {
        Self { pin1, pin2 }
    }

    /// Mutable access to both pins, e.g. to clear a pending interrupt.
    pub fn pins_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.pin1, &mut self.pin2)
    }

    /// Give the pins back.
    pub fn release(self) -> (A, B) {
        (self.pin1, self.pin2)
    }
}

impl<A, B> TwoPinInput for PinPair<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    type Error = A::Error;

    fn read(&mut self) -> Result<PinReading, Self::Error> {
        let pin1 = self.pin1.is_high()?;
        let pin2 = self.pin2.is_high()?;
        Ok(PinReading::from_levels(pin1, pin2))
    }
}

// ---------------------------------------------------------------------------
// Raw port register
// ---------------------------------------------------------------------------

/// Encoder pins sharing one port register.
///
/// `read_port` returns the current port input value; the two masks pick out
/// the encoder pins at compile time. Both pins are sampled by a single
/// register read, so the reading is never torn between two edges.
pub struct PortPins<F, const PIN1_MASK: u8, const PIN2_MASK: u8> {
    read_port: F,
}

impl<F, const PIN1_MASK: u8, const PIN2_MASK: u8> PortPins<F, PIN1_MASK, PIN2_MASK>
where
    F: FnMut() -> u8,
{
    pub fn new(read_port: F) -> Self {
        Self { read_port }
    }
}

impl<F, const PIN1_MASK: u8, const PIN2_MASK: u8> TwoPinInput for PortPins<F, PIN1_MASK, PIN2_MASK>
where
    F: FnMut() -> u8,
{
    type Error = Infallible;

    fn read(&mut self) -> Result<PinReading, Self::Error> {
        Ok(PinReading::from_port((self.read_port)(), PIN1_MASK, PIN2_MASK))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::digital::ErrorType;

    /// Input pin whose level is driven by the test through a shared cell.
    pub(crate) struct FakePin<'a> {
        pub level: &'a Cell<bool>,
    }

    impl ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for FakePin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level.get())
        }
    }

    #[derive(Debug, PartialEq)]
    pub(crate) struct Broken;

    impl embedded_hal::digital::Error for Broken {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    /// Input pin that fails every read.
    pub(crate) struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = Broken;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(Broken)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(Broken)
        }
    }

    // ── PinReading ───────────────────────────────────────────────────

    #[test]
    fn levels_map_pin1_to_bit0() {
        assert_eq!(PinReading::from_levels(false, false).bits(), 0b00);
        assert_eq!(PinReading::from_levels(true, false).bits(), 0b01);
        assert_eq!(PinReading::from_levels(false, true).bits(), 0b10);
        assert_eq!(PinReading::from_levels(true, true).bits(), 0b11);
    }

    #[test]
    fn from_bits_rejects_wide_values() {
        assert_eq!(PinReading::from_bits(0b11).map(PinReading::bits), Some(0b11));
        assert_eq!(PinReading::from_bits(0b100), None);
        assert_eq!(PinReading::from_bits_truncate(0b110).bits(), 0b10);
    }

    #[test]
    fn from_port_uses_masks() {
        // Pin 1 on bit 2, pin 2 on bit 5.
        assert_eq!(PinReading::from_port(0b0000_0100, 1 << 2, 1 << 5).bits(), 0b01);
        assert_eq!(PinReading::from_port(0b0010_0000, 1 << 2, 1 << 5).bits(), 0b10);
        assert_eq!(PinReading::from_port(0b1101_1011, 1 << 2, 1 << 5).bits(), 0b00);
    }

    // ── Inputs ───────────────────────────────────────────────────────

    #[test]
    fn pin_pair_reads_both_pins() {
        let a = Cell::new(true);
        let b = Cell::new(false);
        let mut pair = PinPair::new(FakePin { level: &a }, FakePin { level: &b });
        assert_eq!(pair.read(), Ok(PinReading::from_bits_truncate(0b01)));

        a.set(false);
        b.set(true);
        assert_eq!(pair.read(), Ok(PinReading::from_bits_truncate(0b10)));
    }

    #[test]
    fn pin_pair_propagates_pin_errors() {
        let mut pair = PinPair::new(BrokenPin, BrokenPin);
        assert_eq!(pair.read(), Err(Broken));
    }

    #[test]
    fn default_hooks_succeed() {
        let level = Cell::new(false);
        let mut pair = PinPair::new(FakePin { level: &level }, FakePin { level: &level });
        assert!(pair.enable_pullups().is_ok());
        assert!(pair.enable_change_interrupt().is_ok());
    }

    #[test]
    fn port_pins_sample_register() {
        let port = Cell::new(0u8);
        let mut pins: PortPins<_, 0b0001, 0b1000> = PortPins::new(|| port.get());
        assert_eq!(pins.read(), Ok(PinReading::from_bits_truncate(0b00)));

        port.set(0b1001);
        assert_eq!(pins.read(), Ok(PinReading::from_bits_truncate(0b11)));
    }
}
