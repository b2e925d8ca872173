//! Drive WS2812 LEDs (aka Neopixel) by bit-banging one GPIO.
//!
//! A frame is sent in one blocking call: the pixel count is validated, the
//! pin is made a LOW output, interrupts are masked, the pin's port register
//! is toggled with cycle-counted dwell times, interrupts come back and the
//! line is held LOW for the latch.
//!
//! The timing critical part sits behind [`EmitBits`], so a platform can
//! bring its own emitter. [`CycleEngine`] is the portable one: it only
//! needs a [`RegisterBus`] and a [`CycleCounter`]. With the `cortex-m`
//! feature, [`DwtCycles`] and [`Primask`] provide those for Cortex-M3 and up.
//!
//! [`CycleDelay`] turns the same counter into a `DelayNs` for the latch.
//!
//! It also implements the `SmartLedsWrite` trait from `smart-leds` through
//! [`Strip`].

#![no_std]

pub mod delay;
pub mod driver;
pub mod engine;
pub mod error;
pub mod interrupt;
pub mod pin;
pub mod pixel;
pub mod register;
pub mod stripe;

pub use delay::CycleDelay;
pub use driver::{LATCH_US, Strip, Ws2812};
pub use engine::{CycleCounter, CycleEngine, EmitBits, Timing};
pub use error::Error;
pub use interrupt::{InterruptControl, InterruptGuard, InterruptToken};
pub use pin::{IoTarget, Nrf52840Pins, PinMap};
pub use pixel::{Pixel, wire_bytes};
pub use register::{Mmio, RegisterBus};
pub use stripe::{MAX_PIXELS, StripeState};

#[cfg(feature = "cortex-m")]
pub use engine::DwtCycles;
#[cfg(feature = "cortex-m")]
pub use interrupt::Primask;
