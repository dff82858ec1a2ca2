//! Reverse execution tests.
//!
//! The central property: from any reachable state, n clocks followed by n
//! reverses restores the complete observable state bit for bit, as long as n
//! does not exceed the retained history.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::asm;
use crate::common::harness::{TestContext, snapshot};

/// Address written by the looping test program.
const STORE_ADDR: u64 = 0x200;

/// An endless loop exercising arithmetic, memory traffic, stalls, and a
/// taken jump, so reversal is tested across every pipeline behavior.
fn looping_program() -> Vec<u32> {
    vec![
        asm::addi(1, 1, 1),             // x1 += 1
        asm::addi(2, 0, STORE_ADDR as i32),
        asm::add(3, 1, 2),              // stalls on both producers
        asm::sd(3, 2, 0),               // stalls, then stores
        asm::ld(4, 2, 0),
        asm::jal(0, -20),               // back to the top
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn n_reverses_undo_n_clocks(n in 1usize..24) {
        let mut ctx = TestContext::five_stage();
        ctx.load_program(&looping_program());
        ctx.proc.reset();

        let before = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
        ctx.run(n);
        for _ in 0..n {
            ctx.proc.reverse();
        }
        prop_assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), before);
    }

    #[test]
    fn reversal_restores_any_intermediate_state(k in 1usize..16, n in 1usize..16) {
        let mut ctx = TestContext::five_stage();
        ctx.load_program(&looping_program());

        ctx.run(k);
        let mid = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
        ctx.run(n);
        for _ in 0..n {
            ctx.proc.reverse();
        }
        prop_assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), mid);
    }
}

#[test]
fn reverse_decrements_the_cycle_counter() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&looping_program());
    ctx.run(6);
    ctx.proc.reverse();
    assert_eq!(ctx.proc.cycle_count(), 5);
    ctx.proc.reverse();
    assert_eq!(ctx.proc.cycle_count(), 4);
}

#[test]
fn reverse_restores_stored_memory() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&looping_program());

    // Run until the first store lands.
    let mut guard = 0;
    while ctx.proc.memory().read_u64(STORE_ADDR) == 0 {
        ctx.run(1);
        guard += 1;
        assert!(guard < 32, "store never landed");
    }

    // Unwind the entire run; the store must be rolled back.
    while ctx.proc.cycle_count() > 0 {
        ctx.proc.reverse();
    }
    assert_eq!(ctx.proc.memory().read_u64(STORE_ADDR), 0);
}

#[test]
fn reverse_with_no_history_is_a_no_op() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&looping_program());

    let before = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
    ctx.proc.reverse();
    assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), before);
    assert_eq!(ctx.proc.cycle_count(), 0);
}

#[test]
fn history_bound_limits_how_far_reversal_reaches() {
    let mut ctx = TestContext::five_stage();
    ctx.proc.set_max_reverse_cycles(3);
    ctx.load_program(&looping_program());

    ctx.run(2);
    let at_two = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
    ctx.run(3);

    // Three reverses reach the retained horizon...
    for _ in 0..3 {
        ctx.proc.reverse();
    }
    assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), at_two);

    // ...and a fourth is a no-op: the oldest cycles were evicted.
    ctx.proc.reverse();
    assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), at_two);
    assert_eq!(ctx.proc.cycle_count(), 2);
}

#[test]
fn shrinking_the_bound_mid_run_discards_oldest_history() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&looping_program());

    ctx.run(5);
    let at_three = {
        // Rebuild the reference state by reversing twice and re-running.
        for _ in 0..2 {
            ctx.proc.reverse();
        }
        let s = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
        ctx.run(2);
        s
    };

    ctx.proc.set_max_reverse_cycles(2);
    for _ in 0..4 {
        ctx.proc.reverse();
    }
    assert_eq!(ctx.proc.cycle_count(), 3);
    assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), at_three);
}

#[test]
fn reset_discards_reverse_history() {
    let mut ctx = TestContext::five_stage();
    ctx.load_program(&looping_program());
    ctx.run(5);
    ctx.proc.reset();

    let before = snapshot(ctx.proc.as_ref(), &[STORE_ADDR]);
    ctx.proc.reverse();
    assert_eq!(snapshot(ctx.proc.as_ref(), &[STORE_ADDR]), before);
}
