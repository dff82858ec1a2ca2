//! The controller-facing processor contract.
//!
//! [`Processor`] is the interface every simulated core implements so that a
//! controller can drive, inspect, and time-travel through its execution
//! without knowledge of the concrete ISA or pipeline organization. The
//! contract is single-threaded and synchronous: every operation runs to
//! completion before returning, and the controlling environment is solely
//! responsible for sequencing calls.

use crate::common::SimError;
use crate::interface::features::{Features, FinalizeReason};
use crate::interface::isa::{IsaDescriptor, RegisterFileType};
use crate::interface::signals::ProcessorSignals;
use crate::memory::{AddressSpace, MemoryView};

/// Interface for all simulated processors.
///
/// Optional behavior is negotiated through [`Processor::features`] rather
/// than runtime errors: [`Processor::reverse`] and
/// [`Processor::set_max_reverse_cycles`] default to no-ops and are only
/// meaningful on processors advertising [`Features::REVERSIBLE`].
pub trait Processor {
    /// The set of optional features implemented by this processor.
    ///
    /// Immutable for the lifetime of the instance.
    fn features(&self) -> Features;

    /// The register files exposed by this processor, under inclusion of the
    /// ISA it has been instantiated with.
    fn register_files(&self) -> &[RegisterFileType];

    /// The ISA together with every extension this processor design supports.
    fn supports_isa(&self) -> &IsaDescriptor;

    /// The ISA (and extensions) which the instantiated processor implements.
    fn implements_isa(&self) -> &IsaDescriptor;

    /// Number of pipeline stages; fixed at construction, at least 1.
    fn stage_count(&self) -> usize;

    /// Stable, human-readable label of the stage at `index`.
    fn stage_name(&self, index: usize) -> &'static str;

    /// Snapshot of the stage at `index` for the current cycle.
    fn stage_info(&self, index: usize) -> crate::interface::stage::StageInfo;

    /// Address that will be fetched from instruction memory next cycle.
    fn next_fetched_address(&self) -> u64;

    /// Stage indices at which a breakpoint triggers when the breakpointed
    /// address enters the stage.
    ///
    /// Fixed per processor design. A multi-stage pipeline may trigger at
    /// more than one stage (e.g. fetch and a resolved-branch stage) to avoid
    /// missing mispredicted paths.
    fn breakpoint_triggering_stages(&self) -> &'static [usize];

    /// The combined data and instruction address space, for bulk inspection.
    fn memory(&self) -> &AddressSpace;

    /// Mutable access to the combined address space, e.g. for program loading.
    fn memory_mut(&mut self) -> &mut AddressSpace;

    /// The architectural-register address space, for bulk inspection.
    fn arch_registers(&self) -> &AddressSpace;

    /// Read-only handle to the component driving data memory accesses.
    ///
    /// The concrete type is implementation specific; callers needing more
    /// than the [`MemoryView`] surface downcast via its `as_*` accessors.
    fn data_memory(&self) -> &dyn MemoryView;

    /// Read-only handle to the component driving instruction fetches.
    fn instr_memory(&self) -> &dyn MemoryView;

    /// Reads register `index` of the given file.
    ///
    /// # Errors
    ///
    /// Fails loudly on an unsupported file or out-of-range index; no other
    /// state is affected.
    fn get_register(&self, file: RegisterFileType, index: usize) -> Result<u64, SimError>;

    /// Writes register `index` of the given file.
    ///
    /// # Errors
    ///
    /// Fails loudly on an unsupported file or out-of-range index; no other
    /// state is affected.
    fn set_register(
        &mut self,
        file: RegisterFileType,
        index: usize,
        value: u64,
    ) -> Result<(), SimError>;

    /// Immediately overrides the fetch address for the next cycle.
    fn set_program_counter(&mut self, address: u64);

    /// Changes only the program counter value restored by [`Processor::reset`],
    /// not the currently running address.
    fn set_pc_initial_value(&mut self, address: u64);

    /// Advances the simulation by exactly one cycle.
    ///
    /// Updates every stage's snapshot, increments the cycle counter, and
    /// increments the retirement counter when an instruction fully exits the
    /// pipeline. Emits the clocked signal exactly once, when emission is
    /// enabled.
    fn clock(&mut self);

    /// Returns all architectural state to the initial configuration,
    /// re-applying any previously configured initial program counter.
    ///
    /// Counters return to zero. Emits the reset signal exactly once.
    fn reset(&mut self);

    /// Undoes exactly the most recently committed clock cycle.
    ///
    /// A no-op when [`Features::REVERSIBLE`] is not advertised or when the
    /// retained history is exhausted. Emits the reversed signal exactly once
    /// on success.
    fn reverse(&mut self) {}

    /// Bounds how many past cycles must be reversible.
    ///
    /// History beyond `cycles` may be discarded, oldest first. A no-op when
    /// [`Features::REVERSIBLE`] is not advertised.
    fn set_max_reverse_cycles(&mut self, cycles: usize) {
        let _ = cycles;
    }

    /// Starts the finishing sequence: remaining in-flight instructions are
    /// clocked to retirement but no new instructions are fetched.
    ///
    /// A drain requested only because execution left the executable region
    /// aborts when the next fetch address re-enters it (a control-flow
    /// instruction near the end of the region landing back inside), after
    /// which normal fetching resumes.
    fn finalize(&mut self, reason: FinalizeReason);

    /// Whether draining has completed with no instructions left in flight.
    fn finished(&self) -> bool;

    /// Number of instructions that have retired (executed and left the
    /// pipeline).
    fn instructions_retired(&self) -> u64;

    /// Number of cycles that have been executed.
    fn cycle_count(&self) -> u64;

    /// The outbound signal set, for subscription and emission gating.
    fn signals_mut(&mut self) -> &mut ProcessorSignals;
}
