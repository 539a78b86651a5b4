use pv_core::ports::RendererPort;
use pv_core::Frame;
use tracing::trace;

/// Forwards a frame only when it differs from the previous one.
pub struct Deduplicate<R> {
    inner: R,
    last: Option<Frame>,
    skipped: u64,
}

impl<R: RendererPort> Deduplicate<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            last: None,
            skipped: 0,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Frames dropped because they repeated the previous one.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: RendererPort> RendererPort for Deduplicate<R> {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        if self.last.as_ref() == Some(frame) {
            self.skipped += 1;
            trace!("Frame unchanged, not redrawn");
            return Ok(());
        }
        self.inner.render(frame)?;
        self.last = Some(frame.clone());
        Ok(())
    }
}
