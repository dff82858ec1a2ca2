//! Cycle and retirement counter tests.

use pipescope_core::interface::stage::StageInfo;

use crate::common::asm;
use crate::common::harness::{PROGRAM_BASE, TestContext};

/// Three independent adds: no hazards, so the pipeline never stalls.
fn independent_program() -> Vec<u32> {
    vec![asm::addi(1, 0, 1), asm::addi(2, 0, 2), asm::addi(3, 0, 3)]
}

#[test]
fn counters_start_at_zero() {
    let ctx = TestContext::five_stage();
    assert_eq!(ctx.proc.cycle_count(), 0);
    assert_eq!(ctx.proc.instructions_retired(), 0);
}

#[test]
fn each_clock_advances_the_cycle_counter_by_one() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&independent_program());
    for expected in 1..=8 {
        ctx.run(1);
        assert_eq!(ctx.proc.cycle_count(), expected);
    }
}

#[test]
fn retirement_lags_fetch_by_the_pipeline_depth() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&independent_program());

    // The first instruction reaches writeback on the fifth cycle.
    ctx.run(4);
    assert_eq!(ctx.proc.instructions_retired(), 0);
    ctx.run(1);
    assert_eq!(ctx.proc.instructions_retired(), 1);
    ctx.run(2);
    assert_eq!(ctx.proc.instructions_retired(), 3);
}

#[test]
fn next_fetched_address_tracks_sequential_fetch() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&independent_program());
    assert_eq!(ctx.proc.next_fetched_address(), PROGRAM_BASE);
    ctx.run(1);
    assert_eq!(ctx.proc.next_fetched_address(), PROGRAM_BASE + 4);
    ctx.run(1);
    assert_eq!(ctx.proc.next_fetched_address(), PROGRAM_BASE + 8);
}

#[test]
fn stage_infos_track_instructions_through_the_pipeline() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&independent_program());

    ctx.run(1);
    assert_eq!(ctx.proc.stage_info(0), StageInfo::nominal(PROGRAM_BASE));
    assert_eq!(ctx.proc.stage_info(1), StageInfo::unused());

    ctx.run(1);
    assert_eq!(ctx.proc.stage_info(0), StageInfo::nominal(PROGRAM_BASE + 4));
    assert_eq!(ctx.proc.stage_info(1), StageInfo::nominal(PROGRAM_BASE));

    ctx.run(3);
    assert_eq!(ctx.proc.stage_info(4), StageInfo::nominal(PROGRAM_BASE));
}

#[test]
fn reset_zeroes_counters_and_restores_initial_state() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&[asm::addi(1, 0, 5), asm::sd(1, 0, 0x200)]);
    ctx.run(10);
    assert_eq!(ctx.proc.memory().read_u64(0x200), 5);
    assert_eq!(ctx.reg(1), 5);

    ctx.proc.reset();
    assert_eq!(ctx.proc.cycle_count(), 0);
    assert_eq!(ctx.proc.instructions_retired(), 0);
    assert_eq!(ctx.proc.next_fetched_address(), PROGRAM_BASE);
    assert_eq!(ctx.reg(1), 0);
    // Stores roll back; the program image survives.
    assert_eq!(ctx.proc.memory().read_u64(0x200), 0);
    assert_eq!(ctx.proc.memory().read_u32(PROGRAM_BASE), asm::addi(1, 0, 5));
    for index in 0..ctx.proc.stage_count() {
        assert!(!ctx.proc.stage_info(index).stage_valid);
    }

    // The rerun is deterministic.
    ctx.run(10);
    assert_eq!(ctx.proc.memory().read_u64(0x200), 5);
}
