//! Renderers: the text view for interactive use and a JSON-lines stream for
//! scripting. Both sit behind [`Deduplicate`] so an unchanged frame is not
//! written twice.

mod dedup;
mod json;
mod terminal;

pub use dedup::Deduplicate;
pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;
