//! Memory components owned by processor implementations.
//!
//! This module provides:
//! 1. **Storage:** A sparse, paged, byte-addressable [`AddressSpace`] backing
//!    both the combined data/instruction memory and the architectural
//!    register file.
//! 2. **Opaque Handles:** The [`MemoryView`] trait through which a controller
//!    inspects the components driving data and instruction accesses without
//!    knowing their concrete types.
//! 3. **Registers:** The [`RegisterFile`] exposing registers both as indexed
//!    values and as an address space for bulk inspection.

/// Sparse byte-addressable storage.
pub mod address_space;
/// Opaque memory component handles.
pub mod port;
/// Architectural register file.
pub mod regfile;

pub use address_space::AddressSpace;
pub use port::{AccessKind, MemoryAccess, MemoryPort, MemoryView};
pub use regfile::RegisterFile;
