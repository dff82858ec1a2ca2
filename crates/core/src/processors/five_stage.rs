//! Reversible five-stage in-order reference pipeline.
//!
//! A classic IF/ID/EX/MEM/WB organization implementing the full processor
//! contract:
//! 1. **Observability:** Every stage's [`StageInfo`] is recomputed each cycle.
//! 2. **Hazards:** Register reads interlock in decode; dependent instructions
//!    stall until the producer has written back (IF/ID report `Stalled`).
//! 3. **Control flow:** Branches and jumps resolve in EX; the two younger
//!    pipeline slots are squashed and report `Flushed` (flush dominates
//!    stall).
//! 4. **Reversal:** Per-cycle snapshots in a bounded ring buffer; memory is
//!    restored through a byte-granular undo log.
//! 5. **Draining:** Finalize suppresses fetch while in-flight instructions
//!    retire; region-exit drains abort when the fetch address re-enters the
//!    executable region.
//!
//! Syscalls are dispatched to the environment when ECALL reaches MEM, before
//! younger instructions can read registers the environment writes.

use tracing::{debug, trace};

use crate::common::SimError;
use crate::config::Config;
use crate::interface::env::Environment;
use crate::interface::features::{Features, FinalizeReason};
use crate::interface::isa::{IsaDescriptor, RegisterFileType};
use crate::interface::processor::Processor;
use crate::interface::signals::ProcessorSignals;
use crate::interface::stage::{StageInfo, StageState};
use crate::isa::{Instruction, decode};
use crate::memory::port::AccessKind;
use crate::memory::{AddressSpace, MemoryPort, MemoryView, RegisterFile};
use crate::processors::history::{CycleSnapshot, HistoryBuffer};

/// Stage indices.
const STAGE_IF: usize = 0;
const STAGE_ID: usize = 1;
const STAGE_EX: usize = 2;
const STAGE_MEM: usize = 3;
const STAGE_WB: usize = 4;

const STAGE_COUNT: usize = 5;
const STAGE_NAMES: [&str; STAGE_COUNT] = ["IF", "ID", "EX", "MEM", "WB"];

/// Breakpoints fire when the breakpointed address enters fetch.
const BREAKPOINT_STAGES: [usize; 1] = [STAGE_IF];

const REGISTER_FILES: [RegisterFileType; 1] = [RegisterFileType::Gpr];

/// IF/ID latch entry: fetched, not yet decoded.
#[derive(Clone, Debug)]
struct FetchedEntry {
    pc: u64,
    raw: u32,
}

/// ID/EX latch entry: decoded with register values read under interlock.
#[derive(Clone, Debug)]
struct DecodedEntry {
    pc: u64,
    inst: Instruction,
    rv1: u64,
    rv2: u64,
}

/// EX/MEM latch entry: executed, carrying the ALU result or memory address.
#[derive(Clone, Debug)]
struct ExecutedEntry {
    pc: u64,
    inst: Instruction,
    alu: u64,
    store_data: u64,
}

/// MEM/WB latch entry: ready to retire.
#[derive(Clone, Debug)]
struct RetiringEntry {
    pc: u64,
    rd: Option<usize>,
    value: u64,
}

/// The reversible portion of the core.
///
/// Everything a reverse must restore lives here; one clone per cycle feeds
/// the history buffer. Memory is excluded (restored via undo log) as are the
/// signal subscribers and configuration.
#[derive(Clone, Debug)]
struct CoreState {
    pc: u64,
    regs: RegisterFile,
    if_id: Option<FetchedEntry>,
    id_ex: Option<DecodedEntry>,
    ex_mem: Option<ExecutedEntry>,
    mem_wb: Option<RetiringEntry>,
    finishing: Option<FinalizeReason>,
    cycles: u64,
    retired: u64,
    stages: [StageInfo; STAGE_COUNT],
}

impl CoreState {
    fn initial(config: &Config) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(crate::isa::abi::REG_SP, config.stack_pointer);
        Self {
            pc: config.reset_vector,
            regs,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            finishing: None,
            cycles: 0,
            retired: 0,
            stages: [StageInfo::unused(); STAGE_COUNT],
        }
    }

    fn in_flight(&self) -> bool {
        self.if_id.is_some()
            || self.id_ex.is_some()
            || self.ex_mem.is_some()
            || self.mem_wb.is_some()
    }
}

/// Five-stage in-order pipeline advertising [`Features::REVERSIBLE`].
pub struct FiveStage {
    supported: IsaDescriptor,
    implemented: IsaDescriptor,
    env: Box<dyn Environment>,
    signals: ProcessorSignals,
    mem: AddressSpace,
    /// Memory as of the first clock after construction or reset; restored on
    /// reset so stores do not leak across runs.
    initial_mem: Option<AddressSpace>,
    imem_port: MemoryPort,
    dmem_port: MemoryPort,
    state: CoreState,
    reset_vector: u64,
    config: Config,
    history: HistoryBuffer<CoreState>,
    pending_undo: Vec<(u64, u8)>,
}

impl std::fmt::Debug for FiveStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FiveStage")
            .field("implemented", &self.implemented)
            .field("cycles", &self.state.cycles)
            .field("retired", &self.state.retired)
            .finish_non_exhaustive()
    }
}

impl FiveStage {
    /// The ISA this design supports.
    pub fn supported_isa() -> IsaDescriptor {
        IsaDescriptor::new(crate::interface::isa::IsaBase::Rv64I, &[])
    }

    /// Creates a core implementing `isa`, configured by `config`, delegating
    /// callbacks to `env`.
    pub fn new(isa: IsaDescriptor, config: &Config, env: Box<dyn Environment>) -> Self {
        Self {
            supported: Self::supported_isa(),
            implemented: isa,
            env,
            signals: ProcessorSignals::new(),
            mem: AddressSpace::new(),
            initial_mem: None,
            imem_port: MemoryPort::new("IMEM"),
            dmem_port: MemoryPort::new("DMEM"),
            state: CoreState::initial(config),
            reset_vector: config.reset_vector,
            config: config.clone(),
            history: HistoryBuffer::new(config.max_reverse_cycles),
            pending_undo: Vec::new(),
        }
    }

    /// Writes a doubleword, logging overwritten bytes for reversal.
    fn store_u64(&mut self, addr: u64, value: u64) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            let at = addr.wrapping_add(i as u64);
            self.pending_undo.push((at, self.mem.read_u8(at)));
            self.mem.write_u8(at, *byte);
        }
    }

    /// Whether the current drain may abort when fetch re-enters the
    /// executable region.
    ///
    /// Exit-syscall drains are an explicit request to stop and never abort.
    fn drain_can_abort(reason: FinalizeReason) -> bool {
        reason.contains(FinalizeReason::EXITED_EXECUTABLE_REGION)
            && !reason.contains(FinalizeReason::EXIT_SYSCALL)
    }

}

impl Processor for FiveStage {
    fn features(&self) -> Features {
        Features::REVERSIBLE
    }

    fn register_files(&self) -> &[RegisterFileType] {
        &REGISTER_FILES
    }

    fn supports_isa(&self) -> &IsaDescriptor {
        &self.supported
    }

    fn implements_isa(&self) -> &IsaDescriptor {
        &self.implemented
    }

    fn stage_count(&self) -> usize {
        STAGE_COUNT
    }

    fn stage_name(&self, index: usize) -> &'static str {
        STAGE_NAMES.get(index).copied().unwrap_or("")
    }

    fn stage_info(&self, index: usize) -> StageInfo {
        self.state
            .stages
            .get(index)
            .copied()
            .unwrap_or_else(StageInfo::unused)
    }

    fn next_fetched_address(&self) -> u64 {
        self.state.pc
    }

    fn breakpoint_triggering_stages(&self) -> &'static [usize] {
        &BREAKPOINT_STAGES
    }

    fn memory(&self) -> &AddressSpace {
        &self.mem
    }

    fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.mem
    }

    fn arch_registers(&self) -> &AddressSpace {
        self.state.regs.as_address_space()
    }

    fn data_memory(&self) -> &dyn MemoryView {
        &self.dmem_port
    }

    fn instr_memory(&self) -> &dyn MemoryView {
        &self.imem_port
    }

    fn get_register(&self, file: RegisterFileType, index: usize) -> Result<u64, SimError> {
        match file {
            RegisterFileType::Gpr => self.state.regs.get(index),
            other => Err(SimError::UnknownRegisterFile(other)),
        }
    }

    fn set_register(
        &mut self,
        file: RegisterFileType,
        index: usize,
        value: u64,
    ) -> Result<(), SimError> {
        match file {
            RegisterFileType::Gpr => self.state.regs.set(index, value),
            other => Err(SimError::UnknownRegisterFile(other)),
        }
    }

    fn set_program_counter(&mut self, address: u64) {
        self.state.pc = address;
    }

    fn set_pc_initial_value(&mut self, address: u64) {
        self.reset_vector = address;
    }

    fn clock(&mut self) {
        // Memory present at the first clock of a run is the initial
        // configuration restored by reset.
        if self.state.cycles == 0 {
            self.initial_mem = Some(self.mem.clone());
        }

        let pre_cycle = self.state.clone();
        self.pending_undo.clear();

        let if_id = self.state.if_id.take();
        let id_ex = self.state.id_ex.take();
        let ex_mem = self.state.ex_mem.take();
        let mem_wb = self.state.mem_wb.take();
        let mut stages = [StageInfo::unused(); STAGE_COUNT];

        // WB: retire. Runs first so values written back are visible to this
        // cycle's register reads in decode.
        if let Some(wb) = mem_wb {
            if let Some(rd) = wb.rd {
                self.state.regs.write(rd, wb.value);
            }
            self.state.retired += 1;
            stages[STAGE_WB] = StageInfo::nominal(wb.pc);
        }

        // MEM: data access and syscall dispatch.
        if let Some(m) = ex_mem {
            stages[STAGE_MEM] = StageInfo::nominal(m.pc);
            let retiring = match m.inst {
                Instruction::Ld { rd, .. } => {
                    let value = self.mem.read_u64(m.alu);
                    self.dmem_port.record(m.alu, AccessKind::Read, 8);
                    RetiringEntry {
                        pc: m.pc,
                        rd: Some(rd),
                        value,
                    }
                }
                Instruction::Sd { .. } => {
                    self.store_u64(m.alu, m.store_data);
                    self.dmem_port.record(m.alu, AccessKind::Write, 8);
                    RetiringEntry {
                        pc: m.pc,
                        rd: None,
                        value: 0,
                    }
                }
                Instruction::Ecall => {
                    self.env.handle_syscall(&mut self.state.regs);
                    RetiringEntry {
                        pc: m.pc,
                        rd: None,
                        value: 0,
                    }
                }
                _ => RetiringEntry {
                    pc: m.pc,
                    rd: m.inst.rd(),
                    value: m.alu,
                },
            };
            self.state.mem_wb = Some(retiring);
        }

        // EX: arithmetic and control-flow resolution.
        let mut redirect = None;
        if let Some(d) = id_ex {
            stages[STAGE_EX] = StageInfo::nominal(d.pc);
            let (alu, store_data) = match d.inst {
                Instruction::Lui { imm, .. } => (imm as u64, 0),
                Instruction::Addi { imm, .. } => (d.rv1.wrapping_add(imm as u64), 0),
                Instruction::Add { .. } => (d.rv1.wrapping_add(d.rv2), 0),
                Instruction::Sub { .. } => (d.rv1.wrapping_sub(d.rv2), 0),
                Instruction::Ld { imm, .. } => (d.rv1.wrapping_add(imm as u64), 0),
                Instruction::Sd { imm, .. } => (d.rv1.wrapping_add(imm as u64), d.rv2),
                Instruction::Beq { imm, .. } => {
                    if d.rv1 == d.rv2 {
                        redirect = Some(d.pc.wrapping_add(imm as u64));
                    }
                    (0, 0)
                }
                Instruction::Bne { imm, .. } => {
                    if d.rv1 != d.rv2 {
                        redirect = Some(d.pc.wrapping_add(imm as u64));
                    }
                    (0, 0)
                }
                Instruction::Jal { imm, .. } => {
                    redirect = Some(d.pc.wrapping_add(imm as u64));
                    (d.pc.wrapping_add(4), 0)
                }
                Instruction::Jalr { imm, .. } => {
                    redirect = Some(d.rv1.wrapping_add(imm as u64) & !1);
                    (d.pc.wrapping_add(4), 0)
                }
                Instruction::Ecall | Instruction::Illegal(_) => (0, 0),
            };
            self.state.ex_mem = Some(ExecutedEntry {
                pc: d.pc,
                inst: d.inst,
                alu,
                store_data,
            });
        }

        if let Some(target) = redirect {
            // Squash the two younger slots: the instruction about to decode
            // and this cycle's fetch. Flush dominates any stall condition.
            if let Some(f) = &if_id {
                stages[STAGE_ID] = StageInfo {
                    pc: f.pc,
                    stage_valid: false,
                    state: StageState::Flushed,
                };
            }
            stages[STAGE_IF] = StageInfo {
                pc: self.state.pc,
                stage_valid: false,
                state: StageState::Flushed,
            };
            trace!(target = format_args!("{target:#x}"), "pipeline redirect");
            self.state.pc = target;
        } else {
            // ID: decode under register interlock.
            let mut stalled = false;
            if let Some(f) = if_id {
                let inst = decode(f.raw);
                let producers_pending = {
                    let in_ex = self.state.ex_mem.as_ref().and_then(|e| e.inst.rd());
                    let in_mem = self.state.mem_wb.as_ref().and_then(|e| e.rd);
                    let (s1, s2) = inst.sources();
                    let conflicts = |rd: Option<usize>| {
                        rd.is_some_and(|rd| rd != 0 && (s1 == Some(rd) || s2 == Some(rd)))
                    };
                    conflicts(in_ex) || conflicts(in_mem)
                };
                if producers_pending {
                    stalled = true;
                    stages[STAGE_ID] = StageInfo {
                        pc: f.pc,
                        stage_valid: true,
                        state: StageState::Stalled,
                    };
                    self.state.if_id = Some(f);
                } else {
                    let (s1, s2) = inst.sources();
                    let rv1 = s1.map_or(0, |r| self.state.regs.read(r));
                    let rv2 = s2.map_or(0, |r| self.state.regs.read(r));
                    stages[STAGE_ID] = StageInfo::nominal(f.pc);
                    self.state.id_ex = Some(DecodedEntry {
                        pc: f.pc,
                        inst,
                        rv1,
                        rv2,
                    });
                }
            }

            if stalled {
                // Fetch holds the same address while decode waits.
                stages[STAGE_IF] = StageInfo {
                    pc: self.state.pc,
                    stage_valid: true,
                    state: StageState::Stalled,
                };
            } else {
                // IF: drain bookkeeping, then fetch.
                if let Some(reason) = self.state.finishing {
                    if Self::drain_can_abort(reason)
                        && self.env.is_executable_address(self.state.pc)
                    {
                        debug!(
                            pc = format_args!("{:#x}", self.state.pc),
                            "fetch re-entered executable region, aborting drain"
                        );
                        self.state.finishing = None;
                    }
                }
                if self.state.finishing.is_some() {
                    stages[STAGE_IF] = StageInfo::unused();
                } else {
                    let raw = self.mem.read_u32(self.state.pc);
                    self.imem_port.record(self.state.pc, AccessKind::Fetch, 4);
                    stages[STAGE_IF] = StageInfo::nominal(self.state.pc);
                    self.state.if_id = Some(FetchedEntry {
                        pc: self.state.pc,
                        raw,
                    });
                    self.state.pc = self.state.pc.wrapping_add(4);
                }
            }
        }

        self.state.stages = stages;
        self.state.cycles += 1;
        trace!(cycle = self.state.cycles, retired = self.state.retired, "clock");

        self.history.push(CycleSnapshot {
            state: pre_cycle,
            mem_undo: std::mem::take(&mut self.pending_undo),
        });
        self.signals.emit_clocked();
    }

    fn reset(&mut self) {
        if let Some(init) = self.initial_mem.take() {
            self.mem = init;
        }
        self.state = CoreState::initial(&Config {
            reset_vector: self.reset_vector,
            ..self.config.clone()
        });
        self.history.clear();
        self.pending_undo.clear();
        self.imem_port.reset();
        self.dmem_port.reset();
        debug!(
            pc = format_args!("{:#x}", self.reset_vector),
            "processor reset"
        );
        self.signals.emit_reset();
    }

    fn reverse(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            return;
        };
        for &(addr, byte) in snapshot.mem_undo.iter().rev() {
            self.mem.write_u8(addr, byte);
        }
        self.state = snapshot.state;
        trace!(cycle = self.state.cycles, "reverse");
        self.signals.emit_reversed();
    }

    fn set_max_reverse_cycles(&mut self, cycles: usize) {
        self.history.set_capacity(cycles);
    }

    fn finalize(&mut self, reason: FinalizeReason) {
        debug!(?reason, "finalize requested");
        self.state.finishing = Some(self.state.finishing.map_or(reason, |r| r | reason));
    }

    fn finished(&self) -> bool {
        self.state.finishing.is_some() && !self.state.in_flight()
    }

    fn instructions_retired(&self) -> u64 {
        self.state.retired
    }

    fn cycle_count(&self) -> u64 {
        self.state.cycles
    }

    fn signals_mut(&mut self) -> &mut ProcessorSignals {
        &mut self.signals
    }
}
