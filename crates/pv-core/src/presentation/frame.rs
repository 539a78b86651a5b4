use serde::Serialize;

use super::list_stabilizer::StabilizedTypeList;
use crate::pasteboard::{Namespace, TypeIdentifier};
use crate::selection::SelectionState;

/// Everything the renderer receives for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub namespace: Namespace,
    pub types: StabilizedTypeList,
    pub selection: SelectionState,
    pub title: String,
    pub detail: DetailPane,
}

/// Contents of the detail pane for `(namespace, selected type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailPane {
    /// No type selected.
    Placeholder,
    /// Payload of the selected type.
    Payload(PayloadPreview),
    /// The type vanished between enumeration and read because another
    /// process replaced the pasteboard.
    NoLongerAvailable { type_id: TypeIdentifier },
    /// The backend failed to read the type.
    Unreadable {
        type_id: TypeIdentifier,
        reason: String,
    },
}

/// Bounded view of a payload. Format-specific rendering is left to the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadPreview {
    pub type_id: TypeIdentifier,
    pub total_bytes: usize,
    #[serde(skip_serializing)]
    pub head: Vec<u8>,
}

impl PayloadPreview {
    /// Keep at most `limit` leading bytes of `bytes`.
    pub fn from_bytes(type_id: TypeIdentifier, mut bytes: Vec<u8>, limit: usize) -> Self {
        let total_bytes = bytes.len();
        bytes.truncate(limit);
        Self {
            type_id,
            total_bytes,
            head: bytes,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.head.len() < self.total_bytes
    }

    /// The head decoded as UTF-8, if it is valid text.
    ///
    /// A multi-byte character cut by truncation is dropped rather than
    /// rejecting the whole preview.
    pub fn text(&self) -> Option<&str> {
        match std::str::from_utf8(&self.head) {
            Ok(text) => Some(text),
            Err(err) if self.is_truncated() && err.error_len().is_none() => {
                std::str::from_utf8(&self.head[..err.valid_up_to()]).ok()
            }
            Err(_) => None,
        }
    }
}
