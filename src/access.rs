//! Register access backends and peripheral handles.

use ral_registers::RWRegister;

/// 32-bit register access into one peripheral block.
///
/// `index` counts 32-bit words from the block's base. Implementations must
/// perform exactly one access per call, in program order with respect to
/// other calls on any block. That's what makes the DONE handshake work.
///
/// Access is through a shared reference, like any memory-mapped register.
/// Implementations that need mutable state should use interior mutability.
pub trait Access {
    /// Read the register at `index`.
    fn read(&self, index: usize) -> u32;
    /// Write `value` to the register at `index`.
    fn write(&self, index: usize, value: u32);
    /// Number of registers reachable through this backend, if it's bounded.
    ///
    /// [`Smi::activate`](crate::Smi::activate) refuses blocks that are
    /// smaller than the registers it drives.
    fn words(&self) -> Option<usize> {
        None
    }
}

impl<A: Access + ?Sized> Access for &A {
    fn read(&self, index: usize) -> u32 {
        (**self).read(index)
    }
    fn write(&self, index: usize, value: u32) {
        (**self).write(index, value)
    }
    fn words(&self) -> Option<usize> {
        (**self).words()
    }
}

/// Value of `mmap(2)`'s `MAP_FAILED`.
const MAP_FAILED: usize = usize::MAX;

/// Volatile access to a mapped peripheral block.
///
/// Every access is surrounded by a memory barrier. The BCM2835 peripheral
/// bus doesn't guarantee ordering between different peripherals, and we
/// bounce between SMI, the clock manager, and GPIO during activation.
pub struct Mmio {
    base: *const RWRegister<u32>,
    words: usize,
}

// Safety: the mapping isn't tied to the thread that created it. Mmio
// is not Sync; only one thread drives the block at a time.
unsafe impl Send for Mmio {}

impl Mmio {
    /// Wrap a mapped block of `words` 32-bit registers.
    ///
    /// # Safety
    ///
    /// `base` must point to the start of a peripheral block that stays mapped
    /// for as long as the returned `Mmio` exists, spanning at least `words`
    /// registers. Caller must also make sure that there's only one `Mmio` for
    /// the block, or that all users are externally synchronized.
    pub const unsafe fn new(base: *mut u32, words: usize) -> Self {
        Self {
            base: base.cast_const().cast(),
            words,
        }
    }

    /// Wrap the result of a mapping call.
    ///
    /// A null pointer or `MAP_FAILED` produces an unavailable handle. This is
    /// what you'll see when the process lacks the privilege to map physical
    /// peripheral memory.
    ///
    /// # Safety
    ///
    /// See [`new`](Self::new). The requirements only apply when `base`
    /// indicates a successful mapping.
    pub unsafe fn from_mapping(base: *mut u32, words: usize) -> Handle<Self> {
        if base.is_null() || base as usize == MAP_FAILED {
            Handle::unavailable()
        } else {
            // Safety: caller upholds the mapping requirements.
            Handle::new(unsafe { Self::new(base, words) })
        }
    }

    fn register(&self, index: usize) -> &RWRegister<u32> {
        assert!(index < self.words, "register {index} outside of the mapping");
        // Safety: index is inside the block that the caller promised is mapped.
        unsafe { &*self.base.add(index) }
    }
}

impl Access for Mmio {
    fn read(&self, index: usize) -> u32 {
        let register = self.register(index);
        barrier();
        let value = register.read();
        barrier();
        value
    }

    fn write(&self, index: usize, value: u32) {
        let register = self.register(index);
        barrier();
        register.write(value);
        barrier();
    }

    fn words(&self) -> Option<usize> {
        Some(self.words)
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        #[inline(always)]
        fn barrier() {
            // Safety: a barrier has no inputs or outputs.
            unsafe { core::arch::asm!("dmb sy", options(nostack, preserves_flags)) }
        }
    } else if #[cfg(all(target_arch = "arm", target_feature = "v7"))] {
        #[inline(always)]
        fn barrier() {
            // Safety: a barrier has no inputs or outputs.
            unsafe { core::arch::asm!("dmb", options(nostack, preserves_flags)) }
        }
    } else {
        #[inline(always)]
        fn barrier() {
            core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
        }
    }
}

/// A peripheral register block, or the sentinel for "couldn't be mapped."
///
/// Handles are moved into [`Smi::activate`](crate::Smi::activate), which
/// checks every handle before touching any hardware.
pub struct Handle<A> {
    access: Option<A>,
}

impl<A> Handle<A> {
    /// A handle to a mapped block.
    pub const fn new(access: A) -> Self {
        Self {
            access: Some(access),
        }
    }

    /// A handle for a block that couldn't be mapped.
    pub const fn unavailable() -> Self {
        Self { access: None }
    }

    /// Returns `true` if the block is mapped.
    pub const fn is_available(&self) -> bool {
        self.access.is_some()
    }

    /// Wrap the register block, if there is one.
    ///
    /// Use this to build a [`Gpio`](crate::Gpio) from a mapped GPIO block.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Handle<B> {
        Handle {
            access: self.access.map(f),
        }
    }

    /// Take the register block out of the handle, if there is one.
    pub fn into_inner(self) -> Option<A> {
        self.access
    }
}

impl<A> From<Option<A>> for Handle<A> {
    fn from(access: Option<A>) -> Self {
        Self { access }
    }
}

impl<A> core::fmt::Debug for Handle<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_available() {
            f.write_str("Handle(Mapped)")
        } else {
            f.write_str("Handle(Unavailable)")
        }
    }
}
