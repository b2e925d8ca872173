use core::fmt;

/// Error during WS2812 driver operation.
///
/// Every variant but [`Error::Emit`] is raised before the first edge is
/// driven, so a failed call leaves the strip showing the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// More pixels than a 16-bit wire byte counter can address.
    TooManyPixels {
        /// Requested pixel count.
        length: u16,
        /// Largest accepted pixel count.
        max: u16,
    },
    /// The pixel slice is shorter than the requested length.
    BufferTooShort {
        /// Requested pixel count.
        length: u16,
        /// Pixels actually present in the slice.
        available: usize,
    },
    /// The logical pin has no known port register.
    PinResolution {
        /// Logical pin identifier.
        pin: u8,
    },
    /// The bit emitter gave up part way through the frame.
    Emit,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPixels { length, max } => {
                write!(f, "length is {length} and is too long, max value is {max}")
            }
            Self::BufferTooShort { length, available } => {
                write!(f, "length is {length} but buffer holds only {available} pixels")
            }
            Self::PinResolution { pin } => {
                write!(f, "can't figure out port address for pin {pin}")
            }
            Self::Emit => f.write_str("bit emitter failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TooManyPixels { length, max } => {
                defmt::write!(f, "length is {} and is too long, max value is {}", length, max)
            }
            Self::BufferTooShort { length, available } => {
                defmt::write!(f, "length is {} but buffer holds only {} pixels", length, available)
            }
            Self::PinResolution { pin } => {
                defmt::write!(f, "can't figure out port address for pin {}", pin)
            }
            Self::Emit => defmt::write!(f, "bit emitter failed"),
        }
    }
}
