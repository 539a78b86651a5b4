//! Change detection over the pasteboard change counter.
//!
//! The detector is stateless: the last observed counter lives in
//! [`SelectionState`](crate::selection::SelectionState) and is updated
//! through the next-turn queue once a change has been handled.

use crate::pasteboard::ChangeCounter;

/// Result of comparing a freshly read counter with the last observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Nothing had been observed yet. The counter must be recorded but the
    /// selection is not reset.
    Initial(ChangeCounter),
    /// Counter equals the last observed value.
    Unchanged,
    /// Pasteboard contents were replaced since the last observation.
    Changed {
        previous: ChangeCounter,
        current: ChangeCounter,
    },
}

impl Observation {
    /// Counter that should be recorded for this observation, if any.
    pub fn counter_to_record(&self) -> Option<ChangeCounter> {
        match self {
            Observation::Initial(current) | Observation::Changed { current, .. } => Some(*current),
            Observation::Unchanged => None,
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, Observation::Changed { .. })
    }
}

pub struct ChangeDetector;

impl ChangeDetector {
    pub fn observe(last_observed: Option<ChangeCounter>, current: ChangeCounter) -> Observation {
        match last_observed {
            None => Observation::Initial(current),
            Some(previous) if previous == current => Observation::Unchanged,
            Some(previous) => Observation::Changed { previous, current },
        }
    }
}
