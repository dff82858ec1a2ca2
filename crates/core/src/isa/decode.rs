//! Instruction decoding for the supported RV64I subset.
//!
//! Decoding is total: encodings outside the subset decode to
//! [`Instruction::Illegal`] and flow through the pipeline as inert bubbles
//! rather than aborting the simulation.

use crate::isa::opcodes;

/// A decoded instruction of the supported subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Load upper immediate.
    Lui {
        /// Destination register.
        rd: usize,
        /// Upper-immediate value, already shifted and sign extended.
        imm: i64,
    },
    /// Add immediate.
    Addi {
        /// Destination register.
        rd: usize,
        /// Source register.
        rs1: usize,
        /// Sign-extended immediate.
        imm: i64,
    },
    /// Register-register add.
    Add {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// Register-register subtract.
    Sub {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// Load doubleword.
    Ld {
        /// Destination register.
        rd: usize,
        /// Base address register.
        rs1: usize,
        /// Sign-extended offset.
        imm: i64,
    },
    /// Store doubleword.
    Sd {
        /// Base address register.
        rs1: usize,
        /// Source data register.
        rs2: usize,
        /// Sign-extended offset.
        imm: i64,
    },
    /// Branch if equal.
    Beq {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Sign-extended, PC-relative offset.
        imm: i64,
    },
    /// Branch if not equal.
    Bne {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Sign-extended, PC-relative offset.
        imm: i64,
    },
    /// Jump and link.
    Jal {
        /// Link register.
        rd: usize,
        /// Sign-extended, PC-relative offset.
        imm: i64,
    },
    /// Jump and link register.
    Jalr {
        /// Link register.
        rd: usize,
        /// Base address register.
        rs1: usize,
        /// Sign-extended offset.
        imm: i64,
    },
    /// Environment call.
    Ecall,
    /// Any encoding outside the supported subset.
    Illegal(u32),
}

impl Instruction {
    /// Destination register written at writeback, if any.
    pub const fn rd(&self) -> Option<usize> {
        match *self {
            Self::Lui { rd, .. }
            | Self::Addi { rd, .. }
            | Self::Add { rd, .. }
            | Self::Sub { rd, .. }
            | Self::Ld { rd, .. }
            | Self::Jal { rd, .. }
            | Self::Jalr { rd, .. } => Some(rd),
            _ => None,
        }
    }

    /// Source registers read at decode.
    pub const fn sources(&self) -> (Option<usize>, Option<usize>) {
        match *self {
            Self::Addi { rs1, .. } | Self::Ld { rs1, .. } | Self::Jalr { rs1, .. } => {
                (Some(rs1), None)
            }
            Self::Add { rs1, rs2, .. }
            | Self::Sub { rs1, rs2, .. }
            | Self::Sd { rs1, rs2, .. }
            | Self::Beq { rs1, rs2, .. }
            | Self::Bne { rs1, rs2, .. } => (Some(rs1), Some(rs2)),
            _ => (None, None),
        }
    }

    /// Whether this instruction reads data memory.
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Ld { .. })
    }
}

const fn rd_field(inst: u32) -> usize {
    ((inst >> 7) & 0x1f) as usize
}

const fn rs1_field(inst: u32) -> usize {
    ((inst >> 15) & 0x1f) as usize
}

const fn rs2_field(inst: u32) -> usize {
    ((inst >> 20) & 0x1f) as usize
}

const fn funct3(inst: u32) -> u32 {
    (inst >> 12) & 0x7
}

const fn funct7(inst: u32) -> u32 {
    inst >> 25
}

/// Sign-extended I-type immediate (bits 31:20).
const fn imm_i(inst: u32) -> i64 {
    (inst as i32 >> 20) as i64
}

/// Sign-extended S-type immediate (bits 31:25 | 11:7).
const fn imm_s(inst: u32) -> i64 {
    let upper = (inst as i32 >> 25) as i64;
    let lower = ((inst >> 7) & 0x1f) as i64;
    (upper << 5) | lower
}

/// Sign-extended B-type immediate (bit-scattered, always even).
const fn imm_b(inst: u32) -> i64 {
    let sign = (inst as i32 >> 31) as i64;
    let b11 = ((inst >> 7) & 0x1) as i64;
    let b10_5 = ((inst >> 25) & 0x3f) as i64;
    let b4_1 = ((inst >> 8) & 0xf) as i64;
    (sign << 12) | (b11 << 11) | (b10_5 << 5) | (b4_1 << 1)
}

/// Sign-extended J-type immediate (bit-scattered, always even).
const fn imm_j(inst: u32) -> i64 {
    let sign = (inst as i32 >> 31) as i64;
    let b19_12 = ((inst >> 12) & 0xff) as i64;
    let b11 = ((inst >> 20) & 0x1) as i64;
    let b10_1 = ((inst >> 21) & 0x3ff) as i64;
    (sign << 20) | (b19_12 << 12) | (b11 << 11) | (b10_1 << 1)
}

/// Sign-extended U-type immediate (bits 31:12, shifted into place).
const fn imm_u(inst: u32) -> i64 {
    ((inst & 0xffff_f000) as i32) as i64
}

/// Decodes a 32-bit encoding into the supported subset.
pub const fn decode(inst: u32) -> Instruction {
    let opcode = inst & 0x7f;
    match opcode {
        opcodes::OP_LUI => Instruction::Lui {
            rd: rd_field(inst),
            imm: imm_u(inst),
        },
        opcodes::OP_IMM if funct3(inst) == opcodes::F3_ADD => Instruction::Addi {
            rd: rd_field(inst),
            rs1: rs1_field(inst),
            imm: imm_i(inst),
        },
        opcodes::OP_REG if funct3(inst) == opcodes::F3_ADD && funct7(inst) == opcodes::F7_ADD => {
            Instruction::Add {
                rd: rd_field(inst),
                rs1: rs1_field(inst),
                rs2: rs2_field(inst),
            }
        }
        opcodes::OP_REG if funct3(inst) == opcodes::F3_ADD && funct7(inst) == opcodes::F7_SUB => {
            Instruction::Sub {
                rd: rd_field(inst),
                rs1: rs1_field(inst),
                rs2: rs2_field(inst),
            }
        }
        opcodes::OP_LOAD if funct3(inst) == opcodes::F3_DOUBLEWORD => Instruction::Ld {
            rd: rd_field(inst),
            rs1: rs1_field(inst),
            imm: imm_i(inst),
        },
        opcodes::OP_STORE if funct3(inst) == opcodes::F3_DOUBLEWORD => Instruction::Sd {
            rs1: rs1_field(inst),
            rs2: rs2_field(inst),
            imm: imm_s(inst),
        },
        opcodes::OP_BRANCH if funct3(inst) == opcodes::F3_ADD => Instruction::Beq {
            rs1: rs1_field(inst),
            rs2: rs2_field(inst),
            imm: imm_b(inst),
        },
        opcodes::OP_BRANCH if funct3(inst) == opcodes::F3_BNE => Instruction::Bne {
            rs1: rs1_field(inst),
            rs2: rs2_field(inst),
            imm: imm_b(inst),
        },
        opcodes::OP_JAL => Instruction::Jal {
            rd: rd_field(inst),
            imm: imm_j(inst),
        },
        opcodes::OP_JALR if funct3(inst) == opcodes::F3_ADD => Instruction::Jalr {
            rd: rd_field(inst),
            rs1: rs1_field(inst),
            imm: imm_i(inst),
        },
        opcodes::OP_SYSTEM if inst == opcodes::ECALL => Instruction::Ecall,
        _ => Instruction::Illegal(inst),
    }
}
