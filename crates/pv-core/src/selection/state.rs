use serde::Serialize;

use crate::pasteboard::{ChangeCounter, Namespace, TypeIdentifier};

/// What the user is looking at.
///
/// Created once at startup and mutated only through
/// [`SelectionController`](super::SelectionController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub selected_namespace: Namespace,
    pub selected_type: Option<TypeIdentifier>,
    pub last_observed_change_counter: Option<ChangeCounter>,
}

impl SelectionState {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            selected_namespace: namespace,
            selected_type: None,
            last_observed_change_counter: None,
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        match &self.selected_type {
            None => SelectionPhase::Idle {
                namespace: self.selected_namespace,
            },
            Some(type_id) => SelectionPhase::Selected {
                namespace: self.selected_namespace,
                type_id: type_id.clone(),
            },
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Namespace::default())
    }
}

/// State machine view of [`SelectionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPhase {
    /// A namespace is shown with no representation selected.
    Idle { namespace: Namespace },
    /// A representation of the namespace is selected.
    Selected {
        namespace: Namespace,
        type_id: TypeIdentifier,
    },
}
