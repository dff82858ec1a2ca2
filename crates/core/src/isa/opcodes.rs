//! Opcode and function-field constants for the supported RV64I subset.

/// LUI: load upper immediate.
pub const OP_LUI: u32 = 0b011_0111;
/// Register-immediate integer operations (ADDI).
pub const OP_IMM: u32 = 0b001_0011;
/// Register-register integer operations (ADD, SUB).
pub const OP_REG: u32 = 0b011_0011;
/// Loads (LD).
pub const OP_LOAD: u32 = 0b000_0011;
/// Stores (SD).
pub const OP_STORE: u32 = 0b010_0011;
/// Conditional branches (BEQ, BNE).
pub const OP_BRANCH: u32 = 0b110_0011;
/// Jump and link.
pub const OP_JAL: u32 = 0b110_1111;
/// Jump and link register.
pub const OP_JALR: u32 = 0b110_0111;
/// System instructions (ECALL).
pub const OP_SYSTEM: u32 = 0b111_0011;

/// funct3 for ADDI / ADD / SUB / BEQ.
pub const F3_ADD: u32 = 0b000;
/// funct3 for BNE.
pub const F3_BNE: u32 = 0b001;
/// funct3 for LD / SD (doubleword).
pub const F3_DOUBLEWORD: u32 = 0b011;

/// funct7 for ADD.
pub const F7_ADD: u32 = 0b000_0000;
/// funct7 for SUB.
pub const F7_SUB: u32 = 0b010_0000;

/// Full encoding of ECALL.
pub const ECALL: u32 = 0x0000_0073;
