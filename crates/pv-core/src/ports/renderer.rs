use crate::presentation::Frame;

/// Renderer collaborator: receives one frame per turn.
pub trait RendererPort: Send {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;
}
