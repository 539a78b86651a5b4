use crate::pasteboard::{Namespace, TypeIdentifier};

/// Inputs processed by the viewer's serial event loop. Each event is one
/// turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Polling timer fired.
    Tick,
    /// User picked a namespace.
    NamespaceSelected(Namespace),
    /// User picked a type by identifier.
    TypeSelected(TypeIdentifier),
    /// User picked a type by its position in the list currently shown.
    TypeSelectedAt(usize),
    /// Re-render without polling.
    Refresh,
    /// Stop the event loop.
    Quit,
}

/// Handles one turn of the viewer.
pub trait ViewerEventHandlerPort: Send {
    fn handle_event(&mut self, event: ViewerEvent) -> anyhow::Result<()>;
}
