use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming one data representation on a pasteboard.
///
/// The identifier is opaque: it is compared and displayed, never parsed.
/// Typical values are uniform type identifiers such as
/// `public.utf8-plain-text` or MIME-like tags such as `text/plain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentifier(String);

/// Friendly titles for identifiers users commonly see.
const KNOWN_TITLES: &[(&str, &str)] = &[
    ("public.utf8-plain-text", "Plain Text (UTF-8)"),
    ("public.utf16-plain-text", "Plain Text (UTF-16)"),
    ("public.utf16-external-plain-text", "Plain Text (UTF-16, external)"),
    ("public.plain-text", "Plain Text"),
    ("public.rtf", "Rich Text (RTF)"),
    ("com.apple.flat-rtfd", "Rich Text with Attachments (RTFD)"),
    ("public.html", "HTML"),
    ("public.png", "PNG Image"),
    ("public.tiff", "TIFF Image"),
    ("public.jpeg", "JPEG Image"),
    ("com.adobe.pdf", "PDF"),
    ("public.url", "URL"),
    ("public.file-url", "File URL"),
    ("public.url-name", "URL Name"),
    ("com.apple.cocoa.pasteboard.color", "Color"),
    ("com.apple.cocoa.pasteboard.character-formatting", "Character Formatting"),
    ("com.apple.cocoa.pasteboard.paragraph-formatting", "Paragraph Formatting"),
    ("text/plain", "Plain Text"),
    ("text/html", "HTML"),
    ("text/rtf", "Rich Text (RTF)"),
    ("text/uri-list", "URI List"),
    ("image/png", "PNG Image"),
];

impl TypeIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-presentable title derived from the identifier.
    ///
    /// Unknown identifiers present as themselves.
    pub fn title(&self) -> String {
        KNOWN_TITLES
            .iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, title)| (*title).to_string())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TypeIdentifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TypeIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
