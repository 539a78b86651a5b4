//! Use case for resolving the detail pane of the current selection.

use std::sync::Arc;

use pv_core::ports::{PasteboardError, PasteboardSourcePort};
use pv_core::{DetailPane, Namespace, PayloadPreview, TypeIdentifier};
use tracing::{debug, debug_span, warn};

/// Reads the payload of the selected type.
///
/// ## Behavior
/// - No selection: [`DetailPane::Placeholder`]
/// - Type vanished between enumeration and read: [`DetailPane::NoLongerAvailable`]
/// - Backend failure: [`DetailPane::Unreadable`], logged
///
/// Never fails and never touches the selection state.
pub struct ReadRepresentation {
    source: Arc<dyn PasteboardSourcePort>,
    preview_bytes: usize,
}

impl ReadRepresentation {
    pub fn new(source: Arc<dyn PasteboardSourcePort>, preview_bytes: usize) -> Self {
        Self {
            source,
            preview_bytes,
        }
    }

    pub fn execute(&self, namespace: Namespace, selected: Option<&TypeIdentifier>) -> DetailPane {
        let Some(type_id) = selected else {
            return DetailPane::Placeholder;
        };

        let span = debug_span!(
            "usecase.read_representation.execute",
            namespace = %namespace,
            type_id = %type_id
        );
        let _guard = span.enter();

        match self.source.read_data(namespace, type_id) {
            Ok(bytes) => {
                debug!(total_bytes = bytes.len(), "Read representation");
                DetailPane::Payload(PayloadPreview::from_bytes(
                    type_id.clone(),
                    bytes,
                    self.preview_bytes,
                ))
            }
            Err(PasteboardError::NotAvailable { .. }) => {
                debug!("Representation vanished before it could be read");
                DetailPane::NoLongerAvailable {
                    type_id: type_id.clone(),
                }
            }
            Err(err) => {
                warn!(error = %err, "Failed to read representation");
                DetailPane::Unreadable {
                    type_id: type_id.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }
}
