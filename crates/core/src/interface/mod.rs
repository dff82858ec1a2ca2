//! The simulator-agnostic processor contract.
//!
//! This module defines the interface through which a controlling environment
//! drives and inspects any conforming processor. It provides:
//! 1. **Contract:** The [`processor::Processor`] trait covering clocking,
//!    reset, reversal, finalize draining, and all inspection accessors.
//! 2. **Stage Model:** Per-stage, per-cycle [`stage::StageInfo`] snapshots.
//! 3. **Capabilities:** Static feature and finalize-reason bitmasks.
//! 4. **ISA Descriptors:** Supported vs. instantiated ISA identification.
//! 5. **Events:** Outbound signals and inbound environment callbacks.

/// Inbound callback boundary (executable-region queries, syscall dispatch).
pub mod env;
/// Capability and finalize-reason bitmasks.
pub mod features;
/// ISA descriptors and register file identification.
pub mod isa;
/// The controller-facing processor trait.
pub mod processor;
/// Outbound notification signals.
pub mod signals;
/// Per-stage snapshot model.
pub mod stage;

pub use env::{Environment, NullEnvironment, SyscallAccess};
pub use features::{Features, FinalizeReason};
pub use isa::{IsaBase, IsaDescriptor, IsaExtension, RegisterFileType};
pub use processor::Processor;
pub use signals::{ProcessorSignals, Signal};
pub use stage::{StageInfo, StageState};
