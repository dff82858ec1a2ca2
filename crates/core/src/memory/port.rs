//! Opaque memory component handles.
//!
//! The processor contract returns the components driving data and instruction
//! accesses as [`MemoryView`] trait objects. The concrete types behind them
//! are implementation specific; callers with knowledge of the concrete
//! processor downcast through the `as_*` accessors instead of unchecked type
//! punning. The reference cores expose [`MemoryPort`] handles that record the
//! most recent access for display.

/// Kind of memory access performed through a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch.
    Fetch,
    /// Data load.
    Read,
    /// Data store.
    Write,
}

/// A single recorded memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Address of the access.
    pub addr: u64,
    /// Fetch, load, or store.
    pub kind: AccessKind,
    /// Access width in bytes.
    pub width: usize,
}

/// Read-only view of a memory component, typed opaquely at the contract
/// layer.
pub trait MemoryView {
    /// Short name of the component (e.g. `"IMEM"`, `"DMEM"`).
    fn name(&self) -> &str;

    /// Total number of accesses performed through this component.
    fn access_count(&self) -> u64;

    /// Returns this view as a concrete [`MemoryPort`] if it is one.
    fn as_port(&self) -> Option<&MemoryPort> {
        None
    }
}

/// Memory port of the reference cores: a window onto the shared address
/// space that records its most recent access.
#[derive(Clone, Debug, Default)]
pub struct MemoryPort {
    name: &'static str,
    last: Option<MemoryAccess>,
    accesses: u64,
}

impl MemoryPort {
    /// Creates a named port with no recorded accesses.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            last: None,
            accesses: 0,
        }
    }

    /// Records an access through this port.
    pub fn record(&mut self, addr: u64, kind: AccessKind, width: usize) {
        self.last = Some(MemoryAccess { addr, kind, width });
        self.accesses += 1;
    }

    /// The most recent access, if any.
    pub const fn last_access(&self) -> Option<MemoryAccess> {
        self.last
    }

    /// Clears recorded state (used on processor reset).
    pub fn reset(&mut self) {
        self.last = None;
        self.accesses = 0;
    }
}

impl MemoryView for MemoryPort {
    fn name(&self) -> &str {
        self.name
    }

    fn access_count(&self) -> u64 {
        self.accesses
    }

    fn as_port(&self) -> Option<&MemoryPort> {
        Some(self)
    }
}
