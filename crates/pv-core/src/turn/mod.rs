//! Next-turn scheduling.
//!
//! The viewer runs on one serial queue. Bookkeeping that must not change
//! while a render pass is still reading it is scheduled here and applied at
//! the start of the following turn.

use std::collections::VecDeque;

use crate::pasteboard::ChangeCounter;

/// A state mutation postponed to the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Update the list stabilizer's last known type count.
    RecordTypeCount(usize),
    /// Update the last observed change counter of the selection state.
    ObserveChangeCounter(ChangeCounter),
}

/// FIFO of mutations waiting for the next turn.
#[derive(Debug, Default)]
pub struct NextTurnQueue {
    pending: VecDeque<Deferred>,
}

impl NextTurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, mutation: Deferred) {
        self.pending.push_back(mutation);
    }

    /// Take every pending mutation in scheduling order.
    pub fn drain(&mut self) -> Vec<Deferred> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
