//! Outbound notification signals.
//!
//! A processor notifies its subscribers after completing a clock, reverse, or
//! reset operation. Delivery is synchronous, in subscription order, and
//! exactly once per triggering operation. Emission is gated by an
//! emit-enabled flag so that a controller performing bulk stepping can
//! suppress per-cycle notification churn.

use std::fmt;

/// A zero-argument, multi-subscriber notification.
///
/// Subscribers are invoked synchronously in the order they connected.
#[derive(Default)]
pub struct Signal {
    subscribers: Vec<Box<dyn FnMut()>>,
}

impl Signal {
    /// Creates a signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber invoked on every emission.
    pub fn connect(&mut self, subscriber: impl FnMut() + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Invokes every subscriber once.
    pub fn emit(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber();
        }
    }

    /// Number of connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// The three outbound signals every processor carries, plus the emission gate.
///
/// Processor implementations call the `emit_*` methods exactly once at the
/// end of the corresponding operation; when emission is disabled the call is
/// swallowed and no subscriber runs.
#[derive(Debug)]
pub struct ProcessorSignals {
    /// Emitted after every committed clock cycle.
    pub clocked: Signal,
    /// Emitted after every successfully reversed cycle.
    pub reversed: Signal,
    /// Emitted after every reset.
    pub reset: Signal,
    emits: bool,
}

impl Default for ProcessorSignals {
    fn default() -> Self {
        Self {
            clocked: Signal::new(),
            reversed: Signal::new(),
            reset: Signal::new(),
            emits: true,
        }
    }
}

impl ProcessorSignals {
    /// Creates the signal set with emission enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables emission of all three signals.
    pub fn set_emits(&mut self, emits: bool) {
        self.emits = emits;
    }

    /// Whether emission is currently enabled.
    pub const fn emits(&self) -> bool {
        self.emits
    }

    /// Emits the clocked signal, if emission is enabled.
    pub fn emit_clocked(&mut self) {
        if self.emits {
            self.clocked.emit();
        }
    }

    /// Emits the reversed signal, if emission is enabled.
    pub fn emit_reversed(&mut self) {
        if self.emits {
            self.reversed.emit();
        }
    }

    /// Emits the reset signal, if emission is enabled.
    pub fn emit_reset(&mut self) {
        if self.emits {
            self.reset.emit();
        }
    }
}
