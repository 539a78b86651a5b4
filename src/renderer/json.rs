use std::io::Write;

use anyhow::Context;
use pv_core::ports::RendererPort;
use pv_core::Frame;

/// Writes each frame as one JSON object per line.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> RendererPort for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, frame).context("Failed to serialize frame")?;
        self.out.write_all(b"\n")?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_core::{
        DetailPane, Namespace, PayloadPreview, SelectionState, StabilizedTypeList, TypeIdentifier,
    };

    #[test]
    fn writes_one_line_per_frame() {
        let text = TypeIdentifier::from("public.utf8-plain-text");
        let mut selection = SelectionState::new(Namespace::General);
        selection.selected_type = Some(text.clone());
        let frame = Frame {
            namespace: Namespace::General,
            types: StabilizedTypeList {
                list: vec![text.clone()],
                last_known_count: 1,
            },
            selection,
            title: text.title(),
            detail: DetailPane::Payload(PayloadPreview::from_bytes(text, b"hi".to_vec(), 16)),
        };

        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&frame).unwrap();
        renderer.render(&frame).unwrap();

        let output = String::from_utf8(renderer.writer().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["namespace"], "general");
        assert_eq!(value["title"], "Plain Text (UTF-8)");
        assert_eq!(value["detail"]["state"], "payload");
        assert_eq!(value["detail"]["total_bytes"], 2);
        assert_eq!(value["types"]["list"][0], "public.utf8-plain-text");
    }
}
