//! Logical pin to port register resolution.

use crate::error::Error;
use crate::register::RegisterBus;

/// Resolved form of a pin: the output register that drives it and the
/// single bit inside that register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoTarget {
    /// Address of the port output register.
    pub port: usize,
    /// One-hot mask of the pin within `port`.
    pub mask: u32,
}

impl IoTarget {
    /// Target bit `bit` of the register at `port`. `None` if `bit` is not
    /// in `0..32`.
    pub const fn new(port: usize, bit: u8) -> Option<Self> {
        match 1u32.checked_shl(bit as u32) {
            Some(mask) => Some(Self { port, mask }),
            None => None,
        }
    }
}

/// Board specific pin knowledge.
pub trait PinMap {
    /// Find the port register and bit for `pin`.
    fn resolve(&self, pin: u8) -> Result<IoTarget, Error>;

    /// Make `pin` a push-pull output driven LOW. Unknown pins are ignored.
    fn set_output_low(&mut self, pin: u8);
}

impl<P: PinMap + ?Sized> PinMap for &mut P {
    fn resolve(&self, pin: u8) -> Result<IoTarget, Error> {
        (**self).resolve(pin)
    }

    fn set_output_low(&mut self, pin: u8) {
        (**self).set_output_low(pin)
    }
}

/// GPIO port P0 base address.
const P0_BASE: usize = 0x5000_0000;
/// GPIO port P1 base address.
const P1_BASE: usize = 0x5000_0300;
/// Pins per port.
const PORT_WIDTH: u8 = 32;
/// Highest pin on P1.
const P1_LAST: u8 = 15;

const OUT: usize = 0x504;
const OUTCLR: usize = 0x50C;
const PIN_CNF: usize = 0x700;

/// PIN_CNF: DIR = output.
const CNF_DIR_OUTPUT: u32 = 1 << 0;
/// PIN_CNF: INPUT = disconnect.
const CNF_INPUT_DISCONNECT: u32 = 1 << 1;

/// Pin map of the nRF52840.
///
/// Logical pins `0..=31` are `P0.00..=P0.31`, `32..=47` are
/// `P1.00..=P1.15`. This matches the `P0_13` style naming used by
/// `embassy-nrf`, with P1 pins offset by 32.
pub struct Nrf52840Pins<R> {
    bus: R,
}

impl<R: RegisterBus> Nrf52840Pins<R> {
    pub fn new(bus: R) -> Self {
        Self { bus }
    }

    fn port(pin: u8) -> Option<(usize, u8)> {
        match pin / PORT_WIDTH {
            0 => Some((P0_BASE, pin)),
            1 if pin % PORT_WIDTH <= P1_LAST => Some((P1_BASE, pin % PORT_WIDTH)),
            _ => None,
        }
    }
}

impl<R: RegisterBus> PinMap for Nrf52840Pins<R> {
    fn resolve(&self, pin: u8) -> Result<IoTarget, Error> {
        Self::port(pin)
            .and_then(|(base, bit)| IoTarget::new(base + OUT, bit))
            .ok_or(Error::PinResolution { pin })
    }

    fn set_output_low(&mut self, pin: u8) {
        let Some((base, bit)) = Self::port(pin) else {
            return;
        };
        // Latch LOW first so the pin never glitches high when DIR flips.
        self.bus.write(base + OUTCLR, 1 << bit);
        self.bus.write(
            base + PIN_CNF + 4 * usize::from(bit),
            CNF_DIR_OUTPUT | CNF_INPUT_DISCONNECT,
        );
    }
}
