//! Word access to memory-mapped port registers.

/// Something that can read and write 32-bit registers by address.
pub trait RegisterBus {
    fn read(&mut self, address: usize) -> u32;
    fn write(&mut self, address: usize, value: u32);
}

impl<R: RegisterBus + ?Sized> RegisterBus for &mut R {
    #[inline(always)]
    fn read(&mut self, address: usize) -> u32 {
        (**self).read(address)
    }

    #[inline(always)]
    fn write(&mut self, address: usize, value: u32) {
        (**self).write(address, value)
    }
}

/// Volatile access to the real address space.
#[derive(Debug)]
pub struct Mmio(());

impl Mmio {
    /// # Safety
    ///
    /// Every address later passed to `read` or `write` must be a valid,
    /// 4-byte aligned device register that the caller owns for the duration.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&mut self, address: usize) -> u32 {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, address: usize, value: u32) {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { core::ptr::write_volatile(address as *mut u32, value) }
    }
}
