use thiserror::Error;

use crate::pasteboard::{Namespace, TypeIdentifier};

#[derive(Debug, Error)]
pub enum PasteboardError {
    /// A representation disappeared between enumeration and read because
    /// another process replaced the pasteboard.
    #[error("{type_id} is no longer available on the {namespace} pasteboard")]
    NotAvailable {
        namespace: Namespace,
        type_id: TypeIdentifier,
    },

    #[error("pasteboard backend error: {0}")]
    Backend(String),
}

impl PasteboardError {
    pub fn is_transient_race(&self) -> bool {
        matches!(self, PasteboardError::NotAvailable { .. })
    }
}
