//! Bounded reverse-execution history.
//!
//! Reverse history is a ring of per-cycle snapshots rather than a linked undo
//! chain: eviction of the oldest retained cycle is O(1) and there is no
//! cyclic ownership. Each snapshot pairs a clone of the core's reversible
//! state (taken before the cycle committed) with an undo log of the memory
//! bytes the cycle overwrote; memory is restored by applying the log in
//! reverse, everything else by replacing the state wholesale.

use std::collections::VecDeque;

/// One reversible cycle: pre-cycle core state plus the memory undo log.
#[derive(Debug, Clone)]
pub struct CycleSnapshot<S> {
    /// Core state as it was before the cycle committed.
    pub state: S,
    /// `(address, previous byte)` for every byte the cycle overwrote, in
    /// write order.
    pub mem_undo: Vec<(u64, u8)>,
}

/// Bounded ring of cycle snapshots, oldest evicted first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<S> {
    snapshots: VecDeque<CycleSnapshot<S>>,
    capacity: usize,
}

impl<S> HistoryBuffer<S> {
    /// Creates an empty history retaining at most `capacity` cycles.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Adjusts the retention bound, discarding the oldest excess snapshots.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.snapshots.len() > capacity {
            drop(self.snapshots.pop_front());
        }
    }

    /// Records a committed cycle, evicting the oldest beyond capacity.
    pub fn push(&mut self, snapshot: CycleSnapshot<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            drop(self.snapshots.pop_front());
        }
        self.snapshots.push_back(snapshot);
    }

    /// Takes the most recently committed cycle, if any remains.
    pub fn pop(&mut self) -> Option<CycleSnapshot<S>> {
        self.snapshots.pop_back()
    }

    /// Discards all retained history.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Number of cycles currently reversible.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no cycle can be reversed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
