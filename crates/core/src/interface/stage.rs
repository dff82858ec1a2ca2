//! Per-stage, per-cycle snapshot model.
//!
//! For every pipeline stage, the owning processor recomputes a [`StageInfo`]
//! each cycle describing which instruction (by program counter) occupies the
//! stage and why it is in its current condition. Snapshots are read-only to
//! the controller and are not persisted across cycles.

/// Why a stage is in its current condition this cycle.
///
/// The classifications are mutually exclusive. When a stage is both stalled
/// and about to be flushed, [`StageState::Flushed`] is reported: the
/// instruction is being discarded regardless of the stall cause. On
/// implementations advertising a cache interface, a set-associativity
/// conflict reports [`StageState::WayHazard`] even if it also stalls the
/// stage, since the cache conflict is the root cause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageState {
    /// Nominal execution; the stage holds a live instruction.
    #[default]
    None,
    /// The stage is held while an older instruction resolves.
    Stalled,
    /// The instruction in the stage is being discarded (e.g. after a taken
    /// branch resolved downstream).
    Flushed,
    /// The stage is blocked on a cache set-associativity conflict. Reserved
    /// for processors advertising a cache interface.
    WayHazard,
    /// No instruction occupies the stage (pipeline bubble or drain).
    Unused,
}

/// State of the instruction currently present in a given stage, as well as
/// any additional condition the processor communicates to the controller
/// about that stage.
///
/// Equality is structural over all three fields. If `stage_valid` is false,
/// `state` is [`StageState::Unused`] or [`StageState::Flushed`], never
/// [`StageState::None`]: no live instruction occupies the stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageInfo {
    /// Program counter of the instruction occupying the stage.
    pub pc: u64,
    /// Whether the stage currently holds a live instruction.
    pub stage_valid: bool,
    /// Why the stage is in its current condition.
    pub state: StageState,
}

impl StageInfo {
    /// Snapshot of a stage holding a live instruction in nominal execution.
    pub const fn nominal(pc: u64) -> Self {
        Self {
            pc,
            stage_valid: true,
            state: StageState::None,
        }
    }

    /// Snapshot of an unoccupied stage.
    pub const fn unused() -> Self {
        Self {
            pc: 0,
            stage_valid: false,
            state: StageState::Unused,
        }
    }
}
