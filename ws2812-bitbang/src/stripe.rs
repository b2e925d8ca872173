//! Stripe request and its validation.

use crate::error::Error;
use crate::pixel::{PIXEL_SIZE, Pixel, wire_bytes};

/// Largest pixel count whose wire byte count still fits a `u16`.
pub const MAX_PIXELS: u16 = (u16::MAX as usize / PIXEL_SIZE) as u16;

/// Everything one transmission needs: which pixels, how many, and where.
#[derive(Debug, Clone, Copy)]
pub struct StripeState<'a> {
    pub pixels: &'a [Pixel],
    pub length: u16,
    pub pin: u8,
}

impl<'a> StripeState<'a> {
    /// Send the whole slice to `pin`.
    ///
    /// Slices longer than `u16::MAX` pixels are recorded as `u16::MAX` and
    /// rejected by [`validate`](Self::validate).
    pub fn new(pixels: &'a [Pixel], pin: u8) -> Self {
        let length = u16::try_from(pixels.len()).unwrap_or(u16::MAX);
        Self { pixels, length, pin }
    }

    /// Check the request and return the wire bytes to emit.
    ///
    /// Touches no hardware.
    pub fn validate(&self) -> Result<&'a [u8], Error> {
        if self.length > MAX_PIXELS {
            return Err(Error::TooManyPixels {
                length: self.length,
                max: MAX_PIXELS,
            });
        }
        let pixels = self
            .pixels
            .get(..usize::from(self.length))
            .ok_or(Error::BufferTooShort {
                length: self.length,
                available: self.pixels.len(),
            })?;
        Ok(wire_bytes(pixels))
    }
}
