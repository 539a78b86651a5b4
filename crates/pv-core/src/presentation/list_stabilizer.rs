//! Shape stabilization for the type list.
//!
//! Some list widgets crash when a single update changes their element count
//! across certain boundaries (a sidebar outline going from 16 to 15 rows
//! is the known case). The stabilizer never hands such a transition to the
//! renderer: when the count differs from the last known count, one empty
//! list is exposed first and the new count is recorded on the next turn.
//!
//! Renderers without that limitation use [`StabilizationMode::Passthrough`],
//! which keeps the same interface and exposes the raw list unchanged.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::pasteboard::TypeIdentifier;
use crate::turn::{Deferred, NextTurnQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilizationMode {
    /// Expose an empty list for one cycle whenever the count changes.
    #[default]
    CountDebounce,
    /// Identity: expose the raw list as read.
    Passthrough,
}

/// Type list as exposed to the renderer for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StabilizedTypeList {
    pub list: Vec<TypeIdentifier>,
    /// Count the stabilizer knew about when this list was produced.
    pub last_known_count: usize,
}

impl StabilizedTypeList {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TypeIdentifier> {
        self.list.get(index)
    }

    pub fn contains(&self, type_id: &TypeIdentifier) -> bool {
        self.list.contains(type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeIdentifier> {
        self.list.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ListStabilizer {
    mode: StabilizationMode,
    last_known_count: usize,
}

impl ListStabilizer {
    pub fn new(mode: StabilizationMode) -> Self {
        Self {
            mode,
            last_known_count: 0,
        }
    }

    pub fn last_known_count(&self) -> usize {
        self.last_known_count
    }

    /// Produce the list the renderer may safely show this cycle.
    ///
    /// On a count mismatch the count update is scheduled on `next_turn`
    /// rather than applied here.
    pub fn stabilize(
        &self,
        raw: Vec<TypeIdentifier>,
        next_turn: &mut NextTurnQueue,
    ) -> StabilizedTypeList {
        match self.mode {
            StabilizationMode::Passthrough => StabilizedTypeList {
                last_known_count: raw.len(),
                list: raw,
            },
            StabilizationMode::CountDebounce if raw.len() == self.last_known_count => {
                StabilizedTypeList {
                    list: raw,
                    last_known_count: self.last_known_count,
                }
            }
            StabilizationMode::CountDebounce => {
                trace!(
                    previous = self.last_known_count,
                    current = raw.len(),
                    "list_stabilizer.suppressing_shape_change"
                );
                next_turn.schedule(Deferred::RecordTypeCount(raw.len()));
                StabilizedTypeList {
                    list: Vec::new(),
                    last_known_count: self.last_known_count,
                }
            }
        }
    }

    /// Apply a count scheduled by [`stabilize`](Self::stabilize).
    pub fn record_count(&mut self, count: usize) {
        self.last_known_count = count;
    }
}

impl Default for ListStabilizer {
    fn default() -> Self {
        Self::new(StabilizationMode::default())
    }
}
