//! Architectural register file.
//!
//! The register file is stored inside an [`AddressSpace`] (eight bytes per
//! register) so that the processor contract can expose it for bulk
//! inspection through `arch_registers()` without a second storage scheme.
//! Register `x0` is hardwired to zero. The checked accessors fail loudly on
//! out-of-range indices, since that indicates a controller/processor
//! mismatch.

use crate::common::SimError;
use crate::interface::env::SyscallAccess;
use crate::interface::isa::RegisterFileType;
use crate::memory::AddressSpace;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// General-purpose architectural register file backed by an address space.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    space: AddressSpace,
}

impl RegisterFile {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`. Register `x0` always returns 0.
    ///
    /// Callers pass indices extracted from 5-bit instruction fields; the
    /// checked contract surface is [`RegisterFile::get`].
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 {
            0
        } else {
            self.space.read_u64((idx as u64) * 8)
        }
    }

    /// Writes register `idx`. Writes to `x0` are ignored.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.space.write_u64((idx as u64) * 8, val);
        }
    }

    /// Checked read for the contract surface.
    ///
    /// # Errors
    ///
    /// Fails when `idx` is not a valid general-purpose register index.
    pub fn get(&self, idx: usize) -> Result<u64, SimError> {
        if idx < GPR_COUNT {
            Ok(self.read(idx))
        } else {
            Err(SimError::RegisterIndexOutOfRange {
                file: RegisterFileType::Gpr,
                index: idx,
                count: GPR_COUNT,
            })
        }
    }

    /// Checked write for the contract surface.
    ///
    /// # Errors
    ///
    /// Fails when `idx` is not a valid general-purpose register index.
    pub fn set(&mut self, idx: usize, val: u64) -> Result<(), SimError> {
        if idx < GPR_COUNT {
            self.write(idx, val);
            Ok(())
        } else {
            Err(SimError::RegisterIndexOutOfRange {
                file: RegisterFileType::Gpr,
                index: idx,
                count: GPR_COUNT,
            })
        }
    }

    /// The backing address space, exposed for bulk inspection.
    pub const fn as_address_space(&self) -> &AddressSpace {
        &self.space
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.space.clear();
    }
}

impl SyscallAccess for RegisterFile {
    fn read_reg(&self, file: RegisterFileType, index: usize) -> Result<u64, SimError> {
        match file {
            RegisterFileType::Gpr => self.get(index),
            other => Err(SimError::UnknownRegisterFile(other)),
        }
    }

    fn write_reg(
        &mut self,
        file: RegisterFileType,
        index: usize,
        value: u64,
    ) -> Result<(), SimError> {
        match file {
            RegisterFileType::Gpr => self.set(index, value),
            other => Err(SimError::UnknownRegisterFile(other)),
        }
    }
}
