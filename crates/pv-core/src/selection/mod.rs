//! Selection-consistency state machine.

mod controller;
mod state;

pub use controller::SelectionController;
pub use state::{SelectionPhase, SelectionState};
