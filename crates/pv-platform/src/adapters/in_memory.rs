use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use pv_core::ports::{PasteboardError, PasteboardSourcePort};
use pv_core::{ChangeCounter, Namespace, TypeIdentifier};

#[derive(Debug, Default)]
struct Board {
    counter: i64,
    items: Vec<(TypeIdentifier, Vec<u8>)>,
    /// Types still listed whose data can no longer be read.
    forgotten: Vec<TypeIdentifier>,
}

/// In-memory pasteboard.
///
/// Used for headless runs and tests. Every namespace is an independent
/// board with its own change counter.
#[derive(Debug, Default)]
pub struct InMemoryPasteboard {
    boards: Mutex<HashMap<Namespace, Board>>,
}

impl InMemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn boards(&self) -> Result<MutexGuard<'_, HashMap<Namespace, Board>>, PasteboardError> {
        self.boards
            .lock()
            .map_err(|_| PasteboardError::Backend("in-memory pasteboard lock poisoned".into()))
    }

    /// Replace the contents of `namespace`, bumping its change counter.
    pub fn set_contents<I, T>(&self, namespace: Namespace, items: I) -> Result<(), PasteboardError>
    where
        I: IntoIterator<Item = (T, Vec<u8>)>,
        T: Into<TypeIdentifier>,
    {
        let mut boards = self.boards()?;
        let board = boards.entry(namespace).or_default();
        board.counter += 1;
        board.items = items.into_iter().map(|(t, b)| (t.into(), b)).collect();
        board.forgotten.clear();
        Ok(())
    }

    /// Empty `namespace`, bumping its change counter.
    pub fn clear(&self, namespace: Namespace) -> Result<(), PasteboardError> {
        self.set_contents(namespace, Vec::<(TypeIdentifier, Vec<u8>)>::new())
    }

    /// Keep `type_id` listed but make its data unreadable, as when another
    /// process takes the pasteboard between enumeration and read.
    pub fn forget_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<(), PasteboardError> {
        let mut boards = self.boards()?;
        let board = boards.entry(namespace).or_default();
        if !board.forgotten.contains(type_id) {
            board.forgotten.push(type_id.clone());
        }
        Ok(())
    }
}

impl PasteboardSourcePort for InMemoryPasteboard {
    fn list_types(&self, namespace: Namespace) -> Result<Vec<TypeIdentifier>, PasteboardError> {
        let boards = self.boards()?;
        Ok(boards
            .get(&namespace)
            .map(|b| b.items.iter().map(|(t, _)| t.clone()).collect())
            .unwrap_or_default())
    }

    fn change_counter(&self, namespace: Namespace) -> Result<ChangeCounter, PasteboardError> {
        let boards = self.boards()?;
        Ok(ChangeCounter(
            boards.get(&namespace).map(|b| b.counter).unwrap_or_default(),
        ))
    }

    fn read_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<Vec<u8>, PasteboardError> {
        let boards = self.boards()?;
        boards
            .get(&namespace)
            .filter(|b| !b.forgotten.contains(type_id))
            .and_then(|b| b.items.iter().find(|(t, _)| t == type_id))
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| PasteboardError::NotAvailable {
                namespace,
                type_id: type_id.clone(),
            })
    }
}
