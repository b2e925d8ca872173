//! Top level transmit: validate, set up the pin, emit with interrupts
//! masked, then latch.

use embedded_hal::delay::DelayNs;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::engine::EmitBits;
use crate::error::Error;
use crate::interrupt::{InterruptControl, InterruptGuard};
use crate::pin::PinMap;
use crate::pixel::Pixel;
use crate::stripe::StripeState;

/// WS2812 frame latch time in µs: LOW at least this long ends the frame.
pub const LATCH_US: u32 = 50;

/// Driver for a chain of WS2812-family devices on any pin the pin map knows.
///
/// One blocking call per frame. The pin and its port register belong to
/// the driver for the duration of a call.
pub struct Ws2812<P, E, I, D> {
    pins: P,
    emitter: E,
    interrupts: I,
    delay: D,
}

impl<P, E, I, D> Ws2812<P, E, I, D>
where
    P: PinMap,
    E: EmitBits,
    I: InterruptControl,
    D: DelayNs,
{
    pub fn new(pins: P, emitter: E, interrupts: I, delay: D) -> Self {
        Self {
            pins,
            emitter,
            interrupts,
            delay,
        }
    }

    /// Send `state` to the strip and latch it.
    ///
    /// Validation runs before any hardware access. Interrupts are masked
    /// from just before pin resolution until the last bit is out, and are
    /// back to their prior state before the latch delay starts.
    pub fn transmit(&mut self, state: &StripeState<'_>) -> Result<(), Error> {
        let bytes = state.validate().inspect_err(report)?;

        self.pins.set_output_low(state.pin);

        let sent = {
            let _guard = InterruptGuard::acquire(&mut self.interrupts);
            let target = self.pins.resolve(state.pin).inspect_err(report)?;
            self.emitter.emit_bits(target, bytes)
        };

        self.delay.delay_us(LATCH_US);

        #[cfg(feature = "defmt")]
        defmt::trace!("ws2812: {} bytes on pin {}", bytes.len(), state.pin);

        if sent { Ok(()) } else { Err(Error::Emit).inspect_err(report) }
    }

    /// Boolean form of [`transmit`](Self::transmit): `true` iff the whole
    /// buffer went out and was latched.
    pub fn set_stripe_state(&mut self, state: &StripeState<'_>) -> bool {
        self.transmit(state).is_ok()
    }

    /// Bind the driver to one pin with an `N` pixel frame buffer, for use
    /// through [`SmartLedsWrite`].
    pub fn strip<const N: usize>(&mut self, pin: u8) -> Strip<'_, P, E, I, D, N> {
        Strip {
            driver: self,
            pin,
            frame: [Pixel::default(); N],
        }
    }

    pub fn free(self) -> (P, E, I, D) {
        (self.pins, self.emitter, self.interrupts, self.delay)
    }
}

#[allow(unused_variables)]
fn report(error: &Error) {
    #[cfg(feature = "defmt")]
    defmt::warn!("ws2812: {}", error);
}

/// A [`Ws2812`] bound to one pin, holding up to `N` pixels.
pub struct Strip<'d, P, E, I, D, const N: usize> {
    driver: &'d mut Ws2812<P, E, I, D>,
    pin: u8,
    frame: [Pixel; N],
}

impl<P, E, I, D, const N: usize> SmartLedsWrite for Strip<'_, P, E, I, D, N>
where
    P: PinMap,
    E: EmitBits,
    I: InterruptControl,
    D: DelayNs,
{
    type Error = Error;
    type Color = RGB8;

    /// Write all the items of an iterator to a WS2812 strip.
    ///
    /// Items past `N` are dropped.
    fn write<T, C>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        let mut count = 0usize;
        for (item, slot) in iterator.into_iter().zip(self.frame.iter_mut()) {
            let color: RGB8 = item.into();
            *slot = Pixel::from(color);
            count += 1;
        }
        let state = StripeState {
            pixels: &self.frame,
            length: u16::try_from(count).unwrap_or(u16::MAX),
            pin: self.pin,
        };
        self.driver.transmit(&state)
    }
}
