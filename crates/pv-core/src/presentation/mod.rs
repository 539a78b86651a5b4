//! Values derived for the renderer on every turn.

mod frame;
mod list_stabilizer;
mod title;

pub use frame::{DetailPane, Frame, PayloadPreview};
pub use list_stabilizer::{ListStabilizer, StabilizationMode, StabilizedTypeList};
pub use title::title;
