use std::fmt::Write as _;
use std::io::Write;

use anyhow::Context;
use pv_core::ports::RendererPort;
use pv_core::{DetailPane, Frame, Namespace, PayloadPreview};

/// Bytes shown in the hex view of a binary payload.
const HEX_PREVIEW_BYTES: usize = 64;

/// Plain-text view: title, namespace picker, type list and detail pane.
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> RendererPort for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.out
            .write_all(format_frame(frame).as_bytes())
            .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }
}

/// Render a frame as text. Positions in the list are 1-based, matching the
/// `type <n>` command.
pub fn format_frame(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", frame.title);

    let picker: Vec<String> = Namespace::ALL
        .iter()
        .map(|ns| {
            if *ns == frame.namespace {
                format!("[{}]", ns.presentable_name())
            } else {
                ns.presentable_name().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Pasteboard: {}", picker.join("  "));

    let _ = writeln!(out, "Types:");
    if frame.types.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, type_id) in frame.types.iter().enumerate() {
        let marker = if frame.selection.selected_type.as_ref() == Some(type_id) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:>2}. {}  [{}]",
            marker,
            index + 1,
            type_id.title(),
            type_id
        );
    }

    let _ = writeln!(out, "Detail:");
    match &frame.detail {
        DetailPane::Placeholder => {
            let _ = writeln!(out, "  Select a type to inspect its contents.");
        }
        DetailPane::Payload(preview) => format_payload(&mut out, preview),
        DetailPane::NoLongerAvailable { type_id } => {
            let _ = writeln!(out, "  {} is no longer on the pasteboard.", type_id.title());
        }
        DetailPane::Unreadable { type_id, reason } => {
            let _ = writeln!(out, "  Could not read {}: {}", type_id.title(), reason);
        }
    }
    out.push('\n');
    out
}

fn format_payload(out: &mut String, preview: &PayloadPreview) {
    let _ = writeln!(
        out,
        "  {} byte{}{}",
        preview.total_bytes,
        if preview.total_bytes == 1 { "" } else { "s" },
        if preview.is_truncated() {
            format!(", first {} shown", preview.head.len())
        } else {
            String::new()
        }
    );

    match preview.text() {
        Some(text) => {
            for line in text.lines() {
                let _ = writeln!(out, "  | {}", line);
            }
        }
        None => {
            for chunk in preview.head[..preview.head.len().min(HEX_PREVIEW_BYTES)].chunks(16) {
                let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
                let _ = writeln!(out, "  | {}", hex.join(" "));
            }
        }
    }
}
