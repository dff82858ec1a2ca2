//! Outbound signal delivery and gating tests.

use std::cell::RefCell;
use std::rc::Rc;

use pipescope_core::interface::signals::{ProcessorSignals, Signal};

/// Helper: a counter subscriber and its shared handle.
fn counter() -> (impl FnMut() + 'static, Rc<RefCell<u32>>) {
    let count = Rc::new(RefCell::new(0u32));
    let handle = Rc::clone(&count);
    (move || *count.borrow_mut() += 1, handle)
}

// ══════════════════════════════════════════════════════════
// 1. Single signal
// ══════════════════════════════════════════════════════════

#[test]
fn emit_invokes_every_subscriber_once() {
    let mut signal = Signal::new();
    let (sub_a, count_a) = counter();
    let (sub_b, count_b) = counter();
    signal.connect(sub_a);
    signal.connect(sub_b);
    assert_eq!(signal.subscriber_count(), 2);

    signal.emit();
    assert_eq!(*count_a.borrow(), 1);
    assert_eq!(*count_b.borrow(), 1);

    signal.emit();
    assert_eq!(*count_a.borrow(), 2);
}

#[test]
fn subscribers_run_in_connection_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut signal = Signal::new();
    for id in 0..3 {
        let order = Rc::clone(&order);
        signal.connect(move || order.borrow_mut().push(id));
    }
    signal.emit();
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn emit_with_no_subscribers_is_harmless() {
    let mut signal = Signal::new();
    signal.emit();
    assert_eq!(signal.subscriber_count(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Emission gating
// ══════════════════════════════════════════════════════════

#[test]
fn gated_emission_swallows_all_three_signals() {
    let mut signals = ProcessorSignals::new();
    assert!(signals.emits());

    let (sub, count) = counter();
    signals.clocked.connect(sub);
    let (sub, reversed_count) = counter();
    signals.reversed.connect(sub);
    let (sub, reset_count) = counter();
    signals.reset.connect(sub);

    signals.set_emits(false);
    signals.emit_clocked();
    signals.emit_reversed();
    signals.emit_reset();
    assert_eq!(*count.borrow(), 0);
    assert_eq!(*reversed_count.borrow(), 0);
    assert_eq!(*reset_count.borrow(), 0);

    // Re-enabling resumes delivery; suppressed emissions are not replayed.
    signals.set_emits(true);
    signals.emit_clocked();
    assert_eq!(*count.borrow(), 1);
    assert_eq!(*reversed_count.borrow(), 0);
}
