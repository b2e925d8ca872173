#![no_std]
#![no_main]

use defmt::unwrap;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use smart_leds::{
    RGB8, SmartLedsWrite as _, brightness,
    hsv::{Hsv, hsv2rgb},
};
use ws2812_bitbang::{
    CycleDelay, CycleEngine, DwtCycles, Mmio, Nrf52840Pins, Pixel, Primask, StripeState, Timing,
    Ws2812,
};
use {defmt_rtt as _, panic_probe as _};

/// P0.13. P1 pins are numbered from 32.
const LED_PIN: u8 = 13;
const NUM_LEDS: usize = 8;
/// nRF52840 core clock.
const CPU_HZ: u32 = 64_000_000;
const TIMING: Timing = Timing::from_clock_hz(CPU_HZ);

const _: () = assert!(TIMING.within_tolerance(CPU_HZ));

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    // Held so nothing else in the HAL can claim the data pin.
    let _data_pin = p.P0_13;

    let mut core = unwrap!(cortex_m::Peripherals::take());
    let cycles = DwtCycles::new(&mut core.DCB, &mut core.DWT);

    // SAFETY: the pin map only hands out P0/P1 GPIO registers, and the
    // data pin is reserved above.
    let (pin_bus, port_bus) = unsafe { (Mmio::new(), Mmio::new()) };
    let mut ws = Ws2812::new(
        Nrf52840Pins::new(pin_bus),
        CycleEngine::new(port_bus, cycles, TIMING),
        Primask,
        // Latch counted in CPU cycles, not 30.5 µs RTC ticks.
        CycleDelay::new(cycles, CPU_HZ),
    );

    defmt::info!("Running...");

    let off = [Pixel::default(); NUM_LEDS];
    if !ws.set_stripe_state(&StripeState::new(&off, LED_PIN)) {
        defmt::error!("could not clear strip on pin {}", LED_PIN);
    }

    let mut strip = ws.strip::<NUM_LEDS>(LED_PIN);
    let mut hue_offset = 0u8;
    loop {
        let mut colors = [RGB8::default(); NUM_LEDS];

        for (i, color) in colors.iter_mut().enumerate() {
            let hue = hue_offset.wrapping_add((i as u8) * 32);
            let hsv = Hsv {
                hue,
                sat: 255,
                val: 50, // Keep brightness reasonable
            };
            *color = hsv2rgb(hsv);
        }

        if let Err(e) = strip.write(brightness(colors.into_iter(), 64)) {
            defmt::warn!("frame dropped: {}", e);
        }
        hue_offset = hue_offset.wrapping_add(4);
        Timer::after(Duration::from_millis(25)).await;
    }
}
