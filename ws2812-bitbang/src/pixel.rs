//! Pixel layout as it goes out on the wire.

use bytemuck::{Pod, Zeroable};
use rgb::RGB8;

/// One WS2812 pixel, stored in wire order: green, red, blue.
///
/// The field order is the transmission order. A slice of pixels is a flat
/// run of wire bytes, three per pixel, with no padding.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
pub struct Pixel {
    pub green: u8,
    pub red: u8,
    pub blue: u8,
}

/// Size of one pixel on the wire, in bytes.
pub const PIXEL_SIZE: usize = core::mem::size_of::<Pixel>();

const _: () = assert!(PIXEL_SIZE == 3 && core::mem::align_of::<Pixel>() == 1);

impl Pixel {
    /// Arguments in the usual RGB order; storage stays GRB.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { green, red, blue }
    }
}

impl From<RGB8> for Pixel {
    fn from(c: RGB8) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl From<Pixel> for RGB8 {
    fn from(p: Pixel) -> Self {
        RGB8::new(p.red, p.green, p.blue)
    }
}

/// View a pixel buffer as the bytes to transmit, in order.
pub fn wire_bytes(pixels: &[Pixel]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}
