use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A distinct pasteboard instance.
///
/// Each variant maps 1:1 to one OS pasteboard. `General` is the clipboard
/// users normally copy to and is the default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    #[default]
    General,
    Find,
    Font,
    Ruler,
    Drag,
}

impl Namespace {
    /// All namespaces in picker order.
    pub const ALL: [Namespace; 5] = [
        Namespace::General,
        Namespace::Find,
        Namespace::Font,
        Namespace::Ruler,
        Namespace::Drag,
    ];

    /// Stable lowercase name used in config files and commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::General => "general",
            Namespace::Find => "find",
            Namespace::Font => "font",
            Namespace::Ruler => "ruler",
            Namespace::Drag => "drag",
        }
    }

    /// Name shown in the namespace picker.
    pub fn presentable_name(&self) -> &'static str {
        match self {
            Namespace::General => "General",
            Namespace::Find => "Find",
            Namespace::Font => "Font",
            Namespace::Ruler => "Ruler",
            Namespace::Drag => "Drag",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pasteboard namespace: {0:?} (expected one of general, find, font, ruler, drag)")]
pub struct ParseNamespaceError(pub String);

impl FromStr for Namespace {
    type Err = ParseNamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNamespaceError(s.to_string()))
    }
}
