//! Instruction subset for the reference cores.
//!
//! The contract itself is ISA-agnostic; this module carries just enough of
//! RV64I for the reference processors to exercise every contract property:
//! arithmetic, loads and stores, conditional branches, jumps, and the
//! system-call instruction. It provides:
//! 1. **Decode:** Field extraction and the [`Instruction`] representation.
//! 2. **Opcodes:** Encoding constants for the supported instructions.
//! 3. **ABI:** Conventional register indices (zero, ra, sp, syscall args).

/// Conventional register indices.
pub mod abi;
/// Instruction decoding.
pub mod decode;
/// Opcode and function-field constants.
pub mod opcodes;

pub use decode::{Instruction, decode};
