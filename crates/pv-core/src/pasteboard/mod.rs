//! Pasteboard vocabulary: namespaces, type identifiers and change counters.

mod change_counter;
mod namespace;
mod type_identifier;

pub use change_counter::ChangeCounter;
pub use namespace::{Namespace, ParseNamespaceError};
pub use type_identifier::TypeIdentifier;
