//! Scoped interrupt suppression.
//!
//! A single preempting interrupt in the middle of a bit stretches its
//! dwell time and corrupts the frame, so emission runs with interrupts
//! masked. Only [`InterruptGuard`] touches the global mask.

/// Interrupt enable state captured when interrupts were masked.
///
/// Not `Clone`: a token is handed back exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "interrupts stay masked until the token is restored"]
pub struct InterruptToken {
    was_enabled: bool,
}

impl InterruptToken {
    pub const fn new(was_enabled: bool) -> Self {
        Self { was_enabled }
    }

    pub const fn was_enabled(&self) -> bool {
        self.was_enabled
    }
}

/// Access to the global interrupt enable flag.
pub trait InterruptControl {
    /// Mask interrupts and report whether they were enabled before.
    fn disable(&mut self) -> InterruptToken;

    /// Put the enable flag back to what `token` recorded.
    fn restore(&mut self, token: InterruptToken);
}

impl<I: InterruptControl + ?Sized> InterruptControl for &mut I {
    fn disable(&mut self) -> InterruptToken {
        (**self).disable()
    }

    fn restore(&mut self, token: InterruptToken) {
        (**self).restore(token)
    }
}

/// Interrupts are masked for as long as this value lives.
///
/// Nesting two guards on the same controller is not supported.
pub struct InterruptGuard<'a, I: InterruptControl> {
    control: &'a mut I,
    token: Option<InterruptToken>,
}

impl<'a, I: InterruptControl> InterruptGuard<'a, I> {
    pub fn acquire(control: &'a mut I) -> Self {
        let token = control.disable();
        Self {
            control,
            token: Some(token),
        }
    }
}

impl<I: InterruptControl> Drop for InterruptGuard<'_, I> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.control.restore(token);
        }
    }
}

/// Cortex-M `PRIMASK` based control.
#[cfg(feature = "cortex-m")]
#[derive(Debug, Default)]
pub struct Primask;

#[cfg(feature = "cortex-m")]
impl InterruptControl for Primask {
    #[inline(always)]
    fn disable(&mut self) -> InterruptToken {
        let was_enabled = cortex_m::register::primask::read().is_active();
        cortex_m::interrupt::disable();
        InterruptToken::new(was_enabled)
    }

    #[inline(always)]
    fn restore(&mut self, token: InterruptToken) {
        if token.was_enabled() {
            // SAFETY: interrupts were enabled when the token was taken, and
            // the guard that owned it has ended its critical section.
            unsafe { cortex_m::interrupt::enable() }
        }
    }
}
