//! Async edge-driven decoding.
//!
//! For HALs whose input pins implement [`Wait`], the decoder can be driven
//! from an async task instead of a hand-written interrupt handler: the task
//! sleeps until either pin changes, then samples both pins and steps the
//! decoder.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::direction::Direction;
use crate::encoder::RotaryEncoder;
use crate::error::EncoderError;
use crate::pins::PinPair;
use crate::shared::SharedDecoder;
use crate::table::StepMode;

impl<A, B> PinPair<A, B>
where
    A: InputPin + Wait,
    B: InputPin<Error = A::Error> + Wait,
{
    /// Wait until either pin sees an edge.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if the pin that fired reports an error
    pub async fn wait_for_change(&mut self) -> Result<(), EncoderError<A::Error>> {
        let (pin1, pin2) = self.pins_mut();
        match select(pin1.wait_for_any_edge(), pin2.wait_for_any_edge()).await {
            Either::First(result) | Either::Second(result) => result?,
        }
        Ok(())
    }
}

impl<A, B, M> RotaryEncoder<PinPair<A, B>, M>
where
    A: InputPin + Wait,
    B: InputPin<Error = A::Error> + Wait,
    M: StepMode,
{
    /// Wait for the next completed step.
    ///
    /// Loops over pin edges, processing each, until the decoder emits a
    /// direction. Bounce and partial cycles are absorbed without returning.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] on the first pin error
    pub async fn wait_for_rotation(&mut self) -> Result<Direction, EncoderError<A::Error>> {
        loop {
            self.pins_mut().wait_for_change().await?;
            let direction = self.process()?;
            if !direction.is_none() {
                return Ok(direction);
            }
        }
    }
}

/// Feed a [`SharedDecoder`] from pin edges forever.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Embassy
/// tasks cannot be generic, so wrap it in a thin concrete task:
///
/// ```ignore
/// static ENCODER: SharedDecoder<FullStep> = SharedDecoder::new(CounterConfig::wrapping(24));
///
/// #[embassy_executor::task]
/// async fn encoder_task(pins: PinPair<Input<'static>, Input<'static>>) {
///     monitor(pins, &ENCODER).await
/// }
/// ```
///
/// Pin errors are logged and the loop carries on with the next edge.
pub async fn monitor<A, B, M>(mut pins: PinPair<A, B>, decoder: &SharedDecoder<M>) -> !
where
    A: InputPin + Wait,
    B: InputPin<Error = A::Error> + Wait,
    M: StepMode,
{
    loop {
        if pins.wait_for_change().await.is_err() {
            warn!("encoder pin wait failed");
            continue;
        }

        match decoder.process(&mut pins) {
            Ok(Direction::None) => {}
            Ok(direction) => trace!("encoder {}", direction),
            Err(_) => warn!("encoder pin read failed"),
        }
    }
}
