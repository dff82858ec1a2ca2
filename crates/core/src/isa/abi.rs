//! Conventional register indices for the RISC-V calling convention.

/// Hardwired zero register (`x0`).
pub const REG_ZERO: usize = 0;
/// Return address (`x1`).
pub const REG_RA: usize = 1;
/// Stack pointer (`x2`).
pub const REG_SP: usize = 2;
/// First argument / return value (`x10`).
pub const REG_A0: usize = 10;
/// Second argument (`x11`).
pub const REG_A1: usize = 11;
/// Syscall number register (`x17`).
pub const REG_A7: usize = 17;
