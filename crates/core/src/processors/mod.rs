//! Reference processor implementations and the construction registry.
//!
//! This module provides:
//! 1. **Registry:** [`ProcessorKind`] selection and [`construct`], which
//!    verifies ISA compatibility at construction time so that a mismatch
//!    never reaches simulation.
//! 2. **Cores:** The reversible [`five_stage::FiveStage`] pipeline and the
//!    minimal [`single_cycle::SingleCycle`] core.
//! 3. **History:** The bounded snapshot ring backing reversible execution.

/// Reversible five-stage in-order pipeline.
pub mod five_stage;
/// Bounded reverse-execution history.
pub mod history;
/// Single-cycle core without optional features.
pub mod single_cycle;

use crate::common::SimError;
use crate::config::Config;
use crate::interface::env::Environment;
use crate::interface::isa::IsaDescriptor;
use crate::interface::processor::Processor;

pub use five_stage::FiveStage;
pub use single_cycle::SingleCycle;

/// Available processor designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessorKind {
    /// One instruction per clock, no optional features.
    SingleCycle,
    /// Classic IF/ID/EX/MEM/WB pipeline, reversible.
    FiveStage,
}

impl ProcessorKind {
    /// The ISA (plus extensions) the design supports.
    pub fn supported_isa(self) -> IsaDescriptor {
        match self {
            Self::SingleCycle => SingleCycle::supported_isa(),
            Self::FiveStage => FiveStage::supported_isa(),
        }
    }
}

/// Constructs a processor of the given kind, instantiated with `isa`.
///
/// # Errors
///
/// Fails with [`SimError::IsaMismatch`] when the design does not support the
/// requested ISA; the mismatch is surfaced here so it can never be raised
/// mid-execution.
pub fn construct(
    kind: ProcessorKind,
    isa: &IsaDescriptor,
    config: &Config,
    env: Box<dyn Environment>,
) -> Result<Box<dyn Processor>, SimError> {
    let supported = kind.supported_isa();
    if !supported.is_superset_of(isa) {
        return Err(SimError::IsaMismatch {
            requested: isa.to_string(),
            implemented: supported.to_string(),
        });
    }
    Ok(match kind {
        ProcessorKind::SingleCycle => Box::new(SingleCycle::new(isa.clone(), config, env)),
        ProcessorKind::FiveStage => Box::new(FiveStage::new(isa.clone(), config, env)),
    })
}
