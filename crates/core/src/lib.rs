//! Cycle-level, reversible instruction-pipeline simulation core.
//!
//! This crate defines the contract a simulated processor must satisfy so that an
//! external controller (a debugger or visualizer) can drive, inspect, and
//! time-travel through its execution, independent of the ISA or the underlying
//! simulation technology. It provides:
//! 1. **Contract:** The [`Processor`] trait, per-stage [`StageInfo`] snapshots,
//!    capability and finalize bitmasks, and ISA descriptors.
//! 2. **Boundary:** Outbound clocked/reversed/reset signals and the inbound
//!    [`Environment`] callbacks (executable-region queries, syscall dispatch).
//! 3. **Memory:** Byte-addressable address spaces, opaque memory-port handles,
//!    and the architectural register file.
//! 4. **Reference cores:** A reversible five-stage in-order pipeline and a
//!    single-cycle core over a small RV64I subset, exercising every operation
//!    of the contract.
//! 5. **Simulation support:** Configuration and program loading.

/// Common types and error definitions.
pub mod common;
/// Simulator configuration (defaults and deserializable structures).
pub mod config;
/// The processor contract: trait, stage model, capabilities, signals, callbacks.
pub mod interface;
/// Instruction subset (decode, opcode constants, ABI register indices).
pub mod isa;
/// Program image loading (ELF and flat binaries).
pub mod loader;
/// Address spaces, memory ports, and the architectural register file.
pub mod memory;
/// Reference processor implementations and the construction registry.
pub mod processors;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Controller-facing processor contract.
pub use crate::interface::processor::Processor;
/// Inbound callback boundary implemented by the hosting environment.
pub use crate::interface::env::Environment;
/// Per-stage, per-cycle snapshot reported to the controller.
pub use crate::interface::stage::StageInfo;
