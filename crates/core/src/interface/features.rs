//! Capability and finalize-reason bitmasks.
//!
//! A processor advertises its optional features through a [`Features`] mask
//! fixed at construction time. Callers must check the mask before relying on
//! optional behavior: invoking a reverse operation on a processor that does
//! not advertise [`Features::REVERSIBLE`] is a silent no-op, not an error.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of optional features implemented by a processor.
///
/// Immutable for the lifetime of a processor instance.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Features(u32);

impl Features {
    /// The processor can undo committed clock cycles.
    pub const REVERSIBLE: Self = Self(0b1);
    /// The processor exposes an instruction-cache interface.
    pub const ICACHE_INTERFACE: Self = Self(0b10);
    /// The processor exposes a data-cache interface.
    pub const DCACHE_INTERFACE: Self = Self(0b100);

    /// Returns the empty feature set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Features({:#05b})", self.0)
    }
}

/// Why a finalize (drain) sequence was requested.
///
/// Reasons are combinable: a program that executes an exit syscall from the
/// last instruction of its text segment may report both bits.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeReason(u32);

impl FinalizeReason {
    /// The next fetch address left the region considered executable.
    pub const EXITED_EXECUTABLE_REGION: Self = Self(0b1);
    /// The program requested termination through an exit syscall.
    pub const EXIT_SYSCALL: Self = Self(0b10);

    /// Returns the empty reason set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for FinalizeReason {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FinalizeReason {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for FinalizeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FinalizeReason({:#04b})", self.0)
    }
}
