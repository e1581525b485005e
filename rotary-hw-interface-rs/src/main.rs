//! rotary-hw-interface
//!
//! Encoder → shared decoder → application integration firmware for the
//! Raspberry Pi Pico 2. Shows the single-writer / many-reader split:
//!
//! 1. The knob is turned and one of the encoder pins changes level.
//! 2. The encoder task wakes on the edge, samples both pins, and steps the
//!    `static` [`SharedDecoder`]. This is the only writer.
//! 3. The report task wakes at 10 Hz, takes a consistent snapshot of
//!    position, turns, and direction, and logs it when it changed.
//! 4. Holding the push button on the knob re-zeroes the counters without
//!    disturbing the decoder state machine.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use rotary_decoder::{monitor, CounterConfig, EncoderSnapshot, FullStep, PinPair, SharedDecoder};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Menu position: 16 entries either side of the origin, wrapping into laps.
static ENCODER: SharedDecoder<FullStep> = SharedDecoder::new(CounterConfig::wrapping(16));

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete pin pair for the encoder.
type EncoderPins = PinPair<Input<'static>, Input<'static>>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `monitor` loop so it can be
/// spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn encoder_task(pins: EncoderPins) {
    info!("Encoder task started");
    monitor(pins, &ENCODER).await
}

/// Periodic reader.
///
/// Reads the shared decoder from task context while the encoder task writes
/// it. Each snapshot is taken inside one critical section, so position and
/// turns always belong to the same step.
#[embassy_executor::task]
async fn report_task(mut button: Input<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(100));
    let mut last = EncoderSnapshot::default();

    loop {
        ticker.next().await;

        // Button is active-low.
        if button.is_low() {
            ENCODER.set_position(0, 0);
            info!("Counters zeroed");
            button.wait_for_high().await;
        }

        let snapshot = ENCODER.snapshot();
        if snapshot.position != last.position || snapshot.turns != last.turns {
            info!(
                "position={}, turns={}, last={}",
                snapshot.position, snapshot.turns, snapshot.direction
            );
            last = snapshot;
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("rotary-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // ENC_A   → GP2   (p.PIN_2)   pull-up enabled
    // ENC_B   → GP3   (p.PIN_3)   pull-up enabled
    // ENC_SW  → GP4   (p.PIN_4)   active-low, pull-up enabled
    // ———————————————————————————————————————————————————————————————————————

    let pins = PinPair::new(Input::new(p.PIN_2, Pull::Up), Input::new(p.PIN_3, Pull::Up));
    let button = Input::new(p.PIN_4, Pull::Up);

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(encoder_task(pins)).unwrap();
    spawner.spawn(report_task(button)).unwrap();

    info!("All tasks spawned");
}
