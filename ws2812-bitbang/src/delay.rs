//! Busy-wait delay on a cycle counter.

use embedded_hal::delay::DelayNs;

use crate::engine::CycleCounter;

/// Longest single wait, kept well inside the half range the wrapping
/// comparison can tell apart.
const MAX_CHUNK: u32 = 1 << 30;

/// [`DelayNs`] that spins on a [`CycleCounter`].
///
/// Resolution is one CPU cycle and every wait is rounded up, so a latch
/// asked for 50 µs gets at least 50 µs.
pub struct CycleDelay<C> {
    clock: C,
    clock_hz: u32,
}

impl<C: CycleCounter> CycleDelay<C> {
    pub fn new(clock: C, clock_hz: u32) -> Self {
        Self { clock, clock_hz }
    }

    fn spin(&mut self, cycles: u32) {
        let start = self.clock.now();
        while self.clock.now().wrapping_sub(start) < cycles {}
    }
}

impl<C: CycleCounter> DelayNs for CycleDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        let mut cycles = (u64::from(ns) * u64::from(self.clock_hz)).div_ceil(1_000_000_000);
        while cycles > 0 {
            let chunk = cycles.min(u64::from(MAX_CHUNK)) as u32;
            self.spin(chunk);
            cycles -= u64::from(chunk);
        }
    }
}
