use tracing::debug;

use super::state::{SelectionPhase, SelectionState};
use crate::pasteboard::{ChangeCounter, Namespace, TypeIdentifier};

/// Owns the [`SelectionState`] and exposes its only legal transitions.
///
/// Transitions:
/// - namespace change: `Idle(new namespace)`
/// - pasteboard change: `Selected(first type)`, or `Idle` if the list is empty
/// - user select: `Selected(chosen type)`
///
/// Every transition returns whether the state actually changed.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new(initial_namespace: Namespace) -> Self {
        Self {
            state: SelectionState::new(initial_namespace),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    pub fn namespace(&self) -> Namespace {
        self.state.selected_namespace
    }

    pub fn selected_type(&self) -> Option<&TypeIdentifier> {
        self.state.selected_type.as_ref()
    }

    /// Switch namespace and drop the type selection immediately, so the
    /// next render never shows a type from the previous namespace.
    pub fn on_namespace_change(&mut self, namespace: Namespace) -> bool {
        let changed =
            self.state.selected_namespace != namespace || self.state.selected_type.is_some();

        debug!(
            from = %self.state.selected_namespace,
            to = %namespace,
            "selection.namespace_changed"
        );
        self.state.selected_namespace = namespace;
        self.state.selected_type = None;

        changed
    }

    /// The pasteboard contents were replaced: select the first
    /// representation of the current list, or nothing if it is empty.
    pub fn on_pasteboard_changed(&mut self, current_types: &[TypeIdentifier]) -> bool {
        let next = current_types.first().cloned();
        debug!(
            namespace = %self.state.selected_namespace,
            selected = ?next,
            "selection.reset_after_pasteboard_change"
        );
        self.replace_selected_type(next)
    }

    /// First counter read since startup: seed a selection only when nothing
    /// is selected yet. A user choice made before the first tick is kept.
    pub fn on_initial_observation(&mut self, current_types: &[TypeIdentifier]) -> bool {
        if self.state.selected_type.is_some() {
            return false;
        }
        self.replace_selected_type(current_types.first().cloned())
    }

    /// User intent overrides auto-selection until the next detected change.
    pub fn on_user_select(&mut self, type_id: TypeIdentifier) -> bool {
        debug!(
            namespace = %self.state.selected_namespace,
            selected = %type_id,
            "selection.user_selected"
        );
        self.replace_selected_type(Some(type_id))
    }

    /// Record the counter value a change was handled for. Applied from the
    /// next-turn queue, never during a render pass.
    pub fn record_observed_counter(&mut self, counter: ChangeCounter) {
        self.state.last_observed_change_counter = Some(counter);
    }

    fn replace_selected_type(&mut self, next: Option<TypeIdentifier>) -> bool {
        if self.state.selected_type == next {
            return false;
        }
        self.state.selected_type = next;
        true
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Namespace::default())
    }
}
