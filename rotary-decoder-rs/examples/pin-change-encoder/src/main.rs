//! Pin-change encoder example
//!
//! Demonstrates basic usage of the rotary-decoder crate on the Raspberry Pi
//! Pico 2. Sleeps until either encoder pin changes, decodes the edge, and
//! logs every completed step via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                                  |
//! |-----------|------------|----------------------------------------|
//! | ENC A     | GP2        | Pull-up enabled, encoder common to GND |
//! | ENC B     | GP3        | Pull-up enabled, encoder common to GND |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use rotary_decoder::{CounterConfig, FullStep, PinPair, RotaryEncoder};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// Detents per revolution on the test knob.
const DETENTS: i32 = 24;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- Encoder pins (GP2 = A, GP3 = B) ---
    // The RP2350 configures pulls and edge detection when the pin is built,
    // so `begin` only resets the decoder here.
    let pin_a = Input::new(p.PIN_2, Pull::Up);
    let pin_b = Input::new(p.PIN_3, Pull::Up);

    // One lap is a full revolution: position runs -23..=23, then wraps.
    let mut encoder: RotaryEncoder<_, FullStep> =
        RotaryEncoder::new(PinPair::new(pin_a, pin_b), CounterConfig::wrapping(DETENTS - 1));

    if let Err(e) = encoder.begin(true) {
        error!("Encoder setup failed: {}", Debug2Format(&e));
    }

    // Let the contacts settle before the first sample.
    Timer::after(Duration::from_millis(10)).await;

    info!("Encoder example started, rotate the knob to see steps");

    // Main loop: sleep until a full step, log, repeat.
    loop {
        match encoder.wait_for_rotation().await {
            Ok(direction) => {
                info!(
                    "{}: position={}, turns={}",
                    direction,
                    encoder.position(),
                    encoder.turns(),
                );
            }
            Err(e) => error!("Read failed: {}", Debug2Format(&e)),
        }
    }
}
