//! Single-cycle reference core.
//!
//! Every instruction fetches, executes, and retires within one clock. The
//! core advertises no optional features, which makes it the conformance
//! check for the capability-negotiation side of the contract: `reverse` and
//! `set_max_reverse_cycles` fall through to the trait's no-op defaults.

use tracing::debug;

use crate::common::SimError;
use crate::config::Config;
use crate::interface::env::Environment;
use crate::interface::features::{Features, FinalizeReason};
use crate::interface::isa::{IsaDescriptor, RegisterFileType};
use crate::interface::processor::Processor;
use crate::interface::signals::ProcessorSignals;
use crate::interface::stage::StageInfo;
use crate::isa::{Instruction, decode};
use crate::memory::port::AccessKind;
use crate::memory::{AddressSpace, MemoryPort, MemoryView, RegisterFile};

const STAGE_NAMES: [&str; 1] = ["SC"];
const BREAKPOINT_STAGES: [usize; 1] = [0];
const REGISTER_FILES: [RegisterFileType; 1] = [RegisterFileType::Gpr];

/// Single-stage core executing one instruction per clock.
pub struct SingleCycle {
    supported: IsaDescriptor,
    implemented: IsaDescriptor,
    env: Box<dyn Environment>,
    signals: ProcessorSignals,
    mem: AddressSpace,
    initial_mem: Option<AddressSpace>,
    imem_port: MemoryPort,
    dmem_port: MemoryPort,
    regs: RegisterFile,
    pc: u64,
    reset_vector: u64,
    stack_pointer: u64,
    finishing: Option<FinalizeReason>,
    cycles: u64,
    retired: u64,
    stage: StageInfo,
}

impl std::fmt::Debug for SingleCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleCycle")
            .field("implemented", &self.implemented)
            .field("cycles", &self.cycles)
            .field("retired", &self.retired)
            .finish_non_exhaustive()
    }
}

impl SingleCycle {
    /// The ISA this design supports.
    pub fn supported_isa() -> IsaDescriptor {
        IsaDescriptor::new(crate::interface::isa::IsaBase::Rv64I, &[])
    }

    /// Creates a core implementing `isa`, configured by `config`, delegating
    /// callbacks to `env`.
    pub fn new(isa: IsaDescriptor, config: &Config, env: Box<dyn Environment>) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(crate::isa::abi::REG_SP, config.stack_pointer);
        Self {
            supported: Self::supported_isa(),
            implemented: isa,
            env,
            signals: ProcessorSignals::new(),
            mem: AddressSpace::new(),
            initial_mem: None,
            imem_port: MemoryPort::new("IMEM"),
            dmem_port: MemoryPort::new("DMEM"),
            regs,
            pc: config.reset_vector,
            reset_vector: config.reset_vector,
            stack_pointer: config.stack_pointer,
            finishing: None,
            cycles: 0,
            retired: 0,
            stage: StageInfo::unused(),
        }
    }

    fn execute(&mut self, pc: u64, inst: Instruction) -> u64 {
        let mut next_pc = pc.wrapping_add(4);
        match inst {
            Instruction::Lui { rd, imm } => self.regs.write(rd, imm as u64),
            Instruction::Addi { rd, rs1, imm } => {
                let v = self.regs.read(rs1).wrapping_add(imm as u64);
                self.regs.write(rd, v);
            }
            Instruction::Add { rd, rs1, rs2 } => {
                let v = self.regs.read(rs1).wrapping_add(self.regs.read(rs2));
                self.regs.write(rd, v);
            }
            Instruction::Sub { rd, rs1, rs2 } => {
                let v = self.regs.read(rs1).wrapping_sub(self.regs.read(rs2));
                self.regs.write(rd, v);
            }
            Instruction::Ld { rd, rs1, imm } => {
                let addr = self.regs.read(rs1).wrapping_add(imm as u64);
                let v = self.mem.read_u64(addr);
                self.dmem_port.record(addr, AccessKind::Read, 8);
                self.regs.write(rd, v);
            }
            Instruction::Sd { rs1, rs2, imm } => {
                let addr = self.regs.read(rs1).wrapping_add(imm as u64);
                self.mem.write_u64(addr, self.regs.read(rs2));
                self.dmem_port.record(addr, AccessKind::Write, 8);
            }
            Instruction::Beq { rs1, rs2, imm } => {
                if self.regs.read(rs1) == self.regs.read(rs2) {
                    next_pc = pc.wrapping_add(imm as u64);
                }
            }
            Instruction::Bne { rs1, rs2, imm } => {
                if self.regs.read(rs1) != self.regs.read(rs2) {
                    next_pc = pc.wrapping_add(imm as u64);
                }
            }
            Instruction::Jal { rd, imm } => {
                self.regs.write(rd, pc.wrapping_add(4));
                next_pc = pc.wrapping_add(imm as u64);
            }
            Instruction::Jalr { rd, rs1, imm } => {
                let target = self.regs.read(rs1).wrapping_add(imm as u64) & !1;
                self.regs.write(rd, pc.wrapping_add(4));
                next_pc = target;
            }
            Instruction::Ecall => self.env.handle_syscall(&mut self.regs),
            Instruction::Illegal(_) => {}
        }
        next_pc
    }
}

impl Processor for SingleCycle {
    fn features(&self) -> Features {
        Features::empty()
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
        1
    }

    fn stage_name(&self, index: usize) -> &'static str {
        STAGE_NAMES.get(index).copied().unwrap_or("")
    }

    fn stage_info(&self, index: usize) -> StageInfo {
        if index == 0 {
            self.stage
        } else {
            StageInfo::unused()
        }
    }

    fn next_fetched_address(&self) -> u64 {
        self.pc
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
        self.regs.as_address_space()
    }

    fn data_memory(&self) -> &dyn MemoryView {
        &self.dmem_port
    }

    fn instr_memory(&self) -> &dyn MemoryView {
        &self.imem_port
    }

    fn get_register(&self, file: RegisterFileType, index: usize) -> Result<u64, SimError> {
        match file {
            RegisterFileType::Gpr => self.regs.get(index),
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
            RegisterFileType::Gpr => self.regs.set(index, value),
            other => Err(SimError::UnknownRegisterFile(other)),
        }
    }

    fn set_program_counter(&mut self, address: u64) {
        self.pc = address;
    }

    fn set_pc_initial_value(&mut self, address: u64) {
        self.reset_vector = address;
    }

    fn clock(&mut self) {
        if self.cycles == 0 {
            self.initial_mem = Some(self.mem.clone());
        }

        if let Some(reason) = self.finishing {
            let abortable = reason.contains(FinalizeReason::EXITED_EXECUTABLE_REGION)
                && !reason.contains(FinalizeReason::EXIT_SYSCALL);
            if abortable && self.env.is_executable_address(self.pc) {
                debug!(
                    pc = format_args!("{:#x}", self.pc),
                    "fetch re-entered executable region, aborting drain"
                );
                self.finishing = None;
            }
        }

        if self.finishing.is_some() {
            self.stage = StageInfo::unused();
        } else {
            let pc = self.pc;
            let raw = self.mem.read_u32(pc);
            self.imem_port.record(pc, AccessKind::Fetch, 4);
            let inst = decode(raw);
            self.pc = self.execute(pc, inst);
            self.retired += 1;
            self.stage = StageInfo::nominal(pc);
        }

        self.cycles += 1;
        self.signals.emit_clocked();
    }

    fn reset(&mut self) {
        if let Some(init) = self.initial_mem.take() {
            self.mem = init;
        }
        self.regs.reset();
        self.regs.write(crate::isa::abi::REG_SP, self.stack_pointer);
        self.pc = self.reset_vector;
        self.finishing = None;
        self.cycles = 0;
        self.retired = 0;
        self.stage = StageInfo::unused();
        self.imem_port.reset();
        self.dmem_port.reset();
        self.signals.emit_reset();
    }

    fn finalize(&mut self, reason: FinalizeReason) {
        self.finishing = Some(self.finishing.map_or(reason, |r| r | reason));
    }

    fn finished(&self) -> bool {
        self.finishing.is_some()
    }

    fn instructions_retired(&self) -> u64 {
        self.retired
    }

    fn cycle_count(&self) -> u64 {
        self.cycles
    }

    fn signals_mut(&mut self) -> &mut ProcessorSignals {
        &mut self.signals
    }
}
