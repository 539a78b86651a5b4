//! Pasteboard source port - abstracts the OS pasteboard
//!
//! The viewer only reads. Implementations must be cheap enough to call on
//! every tick: `change_counter` is polled twice a second.

use super::errors::PasteboardError;
use crate::pasteboard::{ChangeCounter, Namespace, TypeIdentifier};

#[cfg_attr(test, mockall::automock)]
pub trait PasteboardSourcePort: Send + Sync {
    /// Identifiers currently present on `namespace`, in the order the OS
    /// enumerates them. The first element is the default selection.
    fn list_types(&self, namespace: Namespace) -> Result<Vec<TypeIdentifier>, PasteboardError>;

    /// Current change counter of `namespace`.
    fn change_counter(&self, namespace: Namespace) -> Result<ChangeCounter, PasteboardError>;

    /// Raw bytes of one representation.
    ///
    /// Fails with [`PasteboardError::NotAvailable`] when the representation
    /// vanished after it was enumerated.
    fn read_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<Vec<u8>, PasteboardError>;
}
