//! Register interlock tests.
//!
//! The pipeline performs no forwarding; a consumer waits in decode until its
//! producer has written back. Both the stall reporting and the eventual
//! values are checked.

use pipescope_core::interface::stage::StageState;

use super::assert_stage_invariants;
use crate::common::asm;
use crate::common::harness::{PROGRAM_BASE, TestContext};

// ══════════════════════════════════════════════════════════
// 1. Read-after-write on an ALU result
// ══════════════════════════════════════════════════════════

#[test]
fn dependent_instruction_stalls_until_writeback() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&[
        asm::addi(1, 0, 7),
        asm::add(2, 1, 1), // reads x1 before the addi has written back
    ]);

    // Cycle 3: producer executes, consumer blocks in decode.
    ctx.run(3);
    let decode = ctx.proc.stage_info(1);
    assert!(decode.stage_valid);
    assert_eq!(decode.state, StageState::Stalled);
    assert_eq!(decode.pc, PROGRAM_BASE + 4);
    // Fetch holds with the decode stage.
    assert_eq!(ctx.proc.stage_info(0).state, StageState::Stalled);
    assert_stage_invariants(ctx.proc.as_ref());

    // Cycle 4: producer in memory, still stalled.
    ctx.run(1);
    assert_eq!(ctx.proc.stage_info(1).state, StageState::Stalled);

    // Cycle 5: producer writes back; the consumer decodes the fresh value.
    ctx.run(1);
    assert_eq!(ctx.proc.stage_info(1).state, StageState::None);
    assert_stage_invariants(ctx.proc.as_ref());

    ctx.run(3);
    assert_eq!(ctx.reg(2), 14);
    assert_eq!(ctx.proc.instructions_retired(), 2);
}

#[test]
fn stalls_do_not_refetch_the_held_instruction() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&[asm::addi(1, 0, 7), asm::add(2, 1, 1)]);

    ctx.run(2);
    let fetches = ctx.proc.instr_memory().access_count();
    // Two stall cycles: fetch is held, not repeated.
    ctx.run(2);
    assert_eq!(ctx.proc.instr_memory().access_count(), fetches);
}

// ══════════════════════════════════════════════════════════
// 2. Load-use
// ══════════════════════════════════════════════════════════

#[test]
fn load_use_stalls_until_the_loaded_value_lands() {
    let mut ctx = TestContext::five_stage();
    ctx.proc.memory_mut().write_u64(0x200, 7);
    ctx.load_program(&[
        asm::ld(5, 0, 0x200),
        asm::add(6, 5, 5),
    ]);

    ctx.run(3);
    assert_eq!(ctx.proc.stage_info(1).state, StageState::Stalled);
    ctx.run(1);
    assert_eq!(ctx.proc.stage_info(1).state, StageState::Stalled);
    assert_stage_invariants(ctx.proc.as_ref());

    ctx.run(4);
    assert_eq!(ctx.reg(5), 7);
    assert_eq!(ctx.reg(6), 14);
}

// ══════════════════════════════════════════════════════════
// 3. Non-hazards
// ══════════════════════════════════════════════════════════

#[test]
fn x0_dependencies_never_stall() {
    let mut ctx = TestContext::five_stage();
    // Every instruction "depends" on x0, which is not a real producer.
    ctx.load_program(&[asm::addi(1, 0, 1), asm::addi(2, 0, 2), asm::addi(3, 0, 3)]);

    for _ in 0..7 {
        ctx.run(1);
        assert_ne!(ctx.proc.stage_info(1).state, StageState::Stalled);
    }
    assert_eq!(ctx.proc.instructions_retired(), 3);
}

#[test]
fn independent_instructions_flow_back_to_back() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&[
        asm::addi(1, 0, 1),
        asm::addi(2, 0, 2),
        asm::add(3, 1, 2), // depends on both, three instructions behind neither
    ]);

    ctx.run(12);
    assert_eq!(ctx.reg(3), 3);
    assert_eq!(ctx.proc.instructions_retired(), 3);
}
