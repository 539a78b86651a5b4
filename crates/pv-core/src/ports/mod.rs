//! Port interfaces
//!
//! Ports define the contract between the viewer logic and the outside
//! world: the OS pasteboard on one side, the renderer and the event loop on
//! the other. Implementations live in `pv-platform` and in the binary.

pub mod errors;
mod pasteboard_source;
mod renderer;
mod viewer_event;

pub use errors::PasteboardError;
pub use pasteboard_source::PasteboardSourcePort;
pub use renderer::RendererPort;
pub use viewer_event::{ViewerEvent, ViewerEventHandlerPort};
