//! Bit transmission engine.
//!
//! Every bit is one period long. The rising edge starts the period, the
//! falling edge comes after the 0 or 1 HIGH dwell, and all bookkeeping for
//! the next bit (byte fetch, bit counter, loop tests) runs during LOW.
//! Edges are scheduled against a free-running cycle counter measured from
//! the rising edge, so both bit values share the same period whatever the
//! compiler does with the code between them.

use crate::pin::IoTarget;
use crate::register::RegisterBus;

/// WS2812 0-bit high time in ns.
pub const T0H_NS: u32 = 350;
/// WS2812 1-bit high time in ns.
pub const T1H_NS: u32 = 900;
/// WS2812 bit period in ns (800 kbit/s).
pub const BIT_NS: u32 = 1250;
/// A 0-bit HIGH at or above this is read as a 1.
pub const T0H_LIMIT_NS: u32 = 500;
/// Allowed deviation of each dwell from its nominal value.
pub const TOLERANCE_NS: u32 = 150;

/// Convert nanoseconds to CPU cycles, rounding.
const fn to_cycles(ns: u32, clock_hz: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

const fn to_ns(cycles: u32, clock_hz: u32) -> u32 {
    (cycles as u64 * 1_000_000_000 / clock_hz as u64) as u32
}

/// Bit timing in CPU cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// HIGH dwell of a 0 bit.
    pub t0h: u32,
    /// HIGH dwell of a 1 bit.
    pub t1h: u32,
    /// Rising edge to rising edge.
    pub period: u32,
}

impl Timing {
    pub const fn from_clock_hz(clock_hz: u32) -> Self {
        Self {
            t0h: to_cycles(T0H_NS, clock_hz),
            t1h: to_cycles(T1H_NS, clock_hz),
            period: to_cycles(BIT_NS, clock_hz),
        }
    }

    /// Whether these cycle counts, run at `clock_hz`, stay within
    /// [`TOLERANCE_NS`] of every nominal dwell and keep the 0-bit HIGH
    /// under [`T0H_LIMIT_NS`].
    pub const fn within_tolerance(&self, clock_hz: u32) -> bool {
        if clock_hz == 0 || !(0 < self.t0h && self.t0h < self.t1h && self.t1h < self.period) {
            return false;
        }
        let t0h = to_ns(self.t0h, clock_hz);
        let t1h = to_ns(self.t1h, clock_hz);
        let period = to_ns(self.period, clock_hz);
        t0h < T0H_LIMIT_NS
            && t0h.abs_diff(T0H_NS) <= TOLERANCE_NS
            && t1h.abs_diff(T1H_NS) <= TOLERANCE_NS
            && (period - t0h).abs_diff(BIT_NS - T0H_NS) <= TOLERANCE_NS
            && (period - t1h).abs_diff(BIT_NS - T1H_NS) <= TOLERANCE_NS
    }
}

/// Free-running, wrapping cycle counter.
pub trait CycleCounter {
    fn now(&mut self) -> u32;
}

impl<C: CycleCounter + ?Sized> CycleCounter for &mut C {
    #[inline(always)]
    fn now(&mut self) -> u32 {
        (**self).now()
    }
}

/// Platform specific bit emitter.
///
/// Called with interrupts masked. Must leave the pin LOW.
pub trait EmitBits {
    /// Emit `bytes` in order, most significant bit first.
    fn emit_bits(&mut self, target: IoTarget, bytes: &[u8]) -> bool;
}

impl<E: EmitBits + ?Sized> EmitBits for &mut E {
    fn emit_bits(&mut self, target: IoTarget, bytes: &[u8]) -> bool {
        (**self).emit_bits(target, bytes)
    }
}

/// Take the highest bit out of `data`, shifting the rest up.
#[inline(always)]
fn shift_out(data: &mut u8) -> bool {
    let (shifted, carry) = data.overflowing_add(*data);
    *data = shifted;
    carry
}

#[inline(always)]
fn wait_until<C: CycleCounter>(clock: &mut C, deadline: u32) {
    while (clock.now().wrapping_sub(deadline) as i32) < 0 {}
}

/// Emitter that times edges with a cycle counter and drives the pin through
/// read-modify-write of its port register.
pub struct CycleEngine<R, C> {
    bus: R,
    clock: C,
    timing: Timing,
}

impl<R, C> CycleEngine<R, C>
where
    R: RegisterBus,
    C: CycleCounter,
{
    pub fn new(bus: R, clock: C, timing: Timing) -> Self {
        Self { bus, clock, timing }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }
}

impl<R, C> EmitBits for CycleEngine<R, C>
where
    R: RegisterBus,
    C: CycleCounter,
{
    fn emit_bits(&mut self, target: IoTarget, bytes: &[u8]) -> bool {
        let Timing { t0h, t1h, period } = self.timing;
        let IoTarget { port, mask } = target;

        // Start one period out so the first rising edge is on the grid too.
        let mut edge = self.clock.now().wrapping_add(period);
        for &byte in bytes {
            let mut data = byte;
            let mut bits: u8 = 8;
            loop {
                wait_until(&mut self.clock, edge);
                let high = self.bus.read(port) | mask;
                self.bus.write(port, high);

                let dwell = if shift_out(&mut data) { t1h } else { t0h };
                wait_until(&mut self.clock, edge.wrapping_add(dwell));
                self.bus.write(port, high ^ mask);

                // LOW from here on, loop control is free.
                edge = edge.wrapping_add(period);
                bits -= 1;
                if bits == 0 {
                    break;
                }
            }
        }
        true
    }
}

/// Cortex-M DWT cycle counter. Copies all read the same counter.
#[cfg(feature = "cortex-m")]
#[derive(Clone, Copy)]
pub struct DwtCycles(());

#[cfg(feature = "cortex-m")]
impl DwtCycles {
    /// Start the cycle counter.
    pub fn new(dcb: &mut cortex_m::peripheral::DCB, dwt: &mut cortex_m::peripheral::DWT) -> Self {
        dcb.enable_trace();
        dwt.enable_cycle_counter();
        Self(())
    }
}

#[cfg(feature = "cortex-m")]
impl CycleCounter for DwtCycles {
    #[inline(always)]
    fn now(&mut self) -> u32 {
        cortex_m::peripheral::DWT::cycle_count()
    }
}
