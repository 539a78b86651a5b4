use serde::{Deserialize, Serialize};
use std::fmt;

/// OS-maintained counter that grows each time a pasteboard's contents are
/// replaced.
///
/// Only equality matters; the absolute value is never shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChangeCounter(pub i64);

impl fmt::Display for ChangeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
