//! Inbound callback boundary to the hosting environment.
//!
//! A processor delegates two queries to the environment that constructed it:
//! 1. **Executable-region validity:** Whether an address lies in a region the
//!    environment considers valid to execute, used to decide when a finalize
//!    drain may abort.
//! 2. **Syscall dispatch:** Control transfer when the processor detects a
//!    system-call instruction. The environment reads the syscall number and
//!    arguments from the processor's registers through the narrow
//!    [`SyscallAccess`] view, performs the corresponding effect, and writes
//!    results back the same way.
//!
//! Callbacks execute synchronously within the calling clock operation and
//! must not re-enter the processor (no clock, reverse, or reset calls).

use crate::common::SimError;
use crate::interface::isa::RegisterFileType;

/// Narrow register view handed to the environment during syscall dispatch.
///
/// Restricting the environment to register access preserves the
/// no-re-entrancy rule: the callee cannot clock, reverse, or reset the
/// processor from inside a callback.
pub trait SyscallAccess {
    /// Reads a single register value.
    ///
    /// # Errors
    ///
    /// Fails when the file is not exposed or the index is out of range.
    fn read_reg(&self, file: RegisterFileType, index: usize) -> Result<u64, SimError>;

    /// Writes a single register value.
    ///
    /// # Errors
    ///
    /// Fails when the file is not exposed or the index is out of range.
    fn write_reg(&mut self, file: RegisterFileType, index: usize, value: u64)
    -> Result<(), SimError>;
}

/// Delegated queries a processor makes to its hosting environment.
pub trait Environment {
    /// Whether `address` lies in a region valid to execute.
    ///
    /// Consulted while draining: a drain begun because execution left the
    /// executable region aborts when the next fetch address re-enters it.
    fn is_executable_address(&self, address: u64) -> bool;

    /// Handles a system call detected by the processor.
    ///
    /// The processor passes no syscall arguments; the environment inspects
    /// the syscall number and argument registers via `regs` and writes any
    /// results back through it.
    fn handle_syscall(&mut self, regs: &mut dyn SyscallAccess);
}

/// Environment that treats no address as executable and ignores syscalls.
///
/// Useful for tests and for driving a processor without a hosting
/// environment; drains never abort and syscalls have no effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {
    fn is_executable_address(&self, _address: u64) -> bool {
        false
    }

    fn handle_syscall(&mut self, _regs: &mut dyn SyscallAccess) {}
}
