//! Instruction encoding helpers for the supported RV64I subset.
//!
//! Tests assemble programs from these rather than hand-written hex so that
//! the intent of each program is readable at the call site. Immediates are
//! taken as signed byte offsets exactly as they appear in assembly listings.

const OP_LUI: u32 = 0b011_0111;
const OP_IMM: u32 = 0b001_0011;
const OP_REG: u32 = 0b011_0011;
const OP_LOAD: u32 = 0b000_0011;
const OP_STORE: u32 = 0b010_0011;
const OP_BRANCH: u32 = 0b110_0011;
const OP_JAL: u32 = 0b110_1111;
const OP_JALR: u32 = 0b110_0111;

const F3_DOUBLEWORD: u32 = 0b011;

const fn r_type(opcode: u32, rd: usize, f3: u32, rs1: usize, rs2: usize, f7: u32) -> u32 {
    (f7 << 25) | ((rs2 as u32) << 20) | ((rs1 as u32) << 15) | (f3 << 12) | ((rd as u32) << 7)
        | opcode
}

const fn i_type(opcode: u32, rd: usize, f3: u32, rs1: usize, imm: i32) -> u32 {
    ((imm as u32 & 0xfff) << 20) | ((rs1 as u32) << 15) | (f3 << 12) | ((rd as u32) << 7) | opcode
}

const fn s_type(opcode: u32, f3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 5 & 0x7f) << 25)
        | ((rs2 as u32) << 20)
        | ((rs1 as u32) << 15)
        | (f3 << 12)
        | ((imm & 0x1f) << 7)
        | opcode
}

const fn b_type(opcode: u32, f3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 12 & 0x1) << 31)
        | ((imm >> 5 & 0x3f) << 25)
        | ((rs2 as u32) << 20)
        | ((rs1 as u32) << 15)
        | (f3 << 12)
        | ((imm >> 1 & 0xf) << 8)
        | ((imm >> 11 & 0x1) << 7)
        | opcode
}

const fn j_type(opcode: u32, rd: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 20 & 0x1) << 31)
        | ((imm >> 1 & 0x3ff) << 21)
        | ((imm >> 11 & 0x1) << 20)
        | ((imm >> 12 & 0xff) << 12)
        | ((rd as u32) << 7)
        | opcode
}

/// `lui rd, value`; `value` is the final register value (low 12 bits zero).
pub const fn lui(rd: usize, value: i64) -> u32 {
    (value as u32 & 0xffff_f000) | ((rd as u32) << 7) | OP_LUI
}

/// `addi rd, rs1, imm`
pub const fn addi(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OP_IMM, rd, 0b000, rs1, imm)
}

/// `add rd, rs1, rs2`
pub const fn add(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OP_REG, rd, 0b000, rs1, rs2, 0b000_0000)
}

/// `sub rd, rs1, rs2`
pub const fn sub(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(OP_REG, rd, 0b000, rs1, rs2, 0b010_0000)
}

/// `ld rd, imm(rs1)`
pub const fn ld(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OP_LOAD, rd, F3_DOUBLEWORD, rs1, imm)
}

/// `sd rs2, imm(rs1)`
pub const fn sd(rs2: usize, rs1: usize, imm: i32) -> u32 {
    s_type(OP_STORE, F3_DOUBLEWORD, rs1, rs2, imm)
}

/// `beq rs1, rs2, offset` with a PC-relative byte offset.
pub const fn beq(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(OP_BRANCH, 0b000, rs1, rs2, offset)
}

/// `bne rs1, rs2, offset` with a PC-relative byte offset.
pub const fn bne(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(OP_BRANCH, 0b001, rs1, rs2, offset)
}

/// `jal rd, offset` with a PC-relative byte offset.
pub const fn jal(rd: usize, offset: i32) -> u32 {
    j_type(OP_JAL, rd, offset)
}

/// `jalr rd, imm(rs1)`
pub const fn jalr(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(OP_JALR, rd, 0b000, rs1, imm)
}

/// `ecall`
pub const fn ecall() -> u32 {
    0x0000_0073
}

/// `addi x0, x0, 0`
pub const fn nop() -> u32 {
    addi(0, 0, 0)
}
