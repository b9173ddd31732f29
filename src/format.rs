use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyphs::CyrillicGlyphs;
use crate::line::{ControlChar, LineEncoder, TERMINATOR};
use crate::offsets::{ByteOrder, OffsetTable};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported output format: {0}")]
    UnsupportedOutputFormat(String),
    #[error("failed to read format config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid format config {path}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the offset table lives relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Table and text in one buffer; offsets are absolute within it.
    Interleaved,
    /// Table and text in separate buffers; offsets are relative to the text.
    Split,
}

/// Everything that differs between output targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormat {
    pub name: String,
    pub byte_order: ByteOrder,
    pub layout: Layout,
    /// Byte written at the end of every line.
    #[serde(default)]
    pub terminator: u8,
    /// Source characters that become raw control bytes.
    #[serde(default)]
    pub controls: Vec<ControlChar>,
}

impl OutputFormat {
    /// Single `.TBN` file: little-endian table in front of the text, `|` and `#`
    /// as line-feed and vertical-tab.
    pub fn tbn() -> Self {
        Self {
            name: "tbn".to_string(),
            byte_order: ByteOrder::Little,
            layout: Layout::Interleaved,
            terminator: TERMINATOR,
            controls: vec![
                ControlChar { ch: '|', byte: 0x0A },
                ControlChar { ch: '#', byte: 0x0B },
            ],
        }
    }

    /// `.BIN` offsets plus a `.TXT` text file with one string per line.
    pub fn bin() -> Self {
        Self {
            name: "bin".to_string(),
            byte_order: ByteOrder::Big,
            layout: Layout::Split,
            terminator: b'\n',
            controls: Vec::new(),
        }
    }

    /// Resolve a preset by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self, FormatError> {
        match name.to_ascii_lowercase().as_str() {
            "tbn" => Ok(Self::tbn()),
            "bin" => Ok(Self::bin()),
            _ => Err(FormatError::UnsupportedOutputFormat(name.to_string())),
        }
    }

    /// Pick the preset matching the extension of `path`.
    pub fn for_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| FormatError::UnsupportedOutputFormat(path.display().to_string()))?;
        Self::preset(ext)
            .map_err(|_| FormatError::UnsupportedOutputFormat(path.display().to_string()))
    }

    /// Load a custom descriptor from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let raw = fs::read_to_string(path).map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| FormatError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Constant added to every offset for `line_count` lines.
    pub fn shift(&self, line_count: usize) -> usize {
        match self.layout {
            Layout::Interleaved => OffsetTable::byte_size(line_count),
            Layout::Split => 0,
        }
    }

    pub fn encoder(&self) -> LineEncoder<CyrillicGlyphs> {
        LineEncoder::cyrillic()
            .with_controls(self.controls.iter().copied())
            .with_terminator(self.terminator)
    }
}

/// Companion text path for a split output: `STRINGS.BIN` → `STRINGS.TXT`.
/// The extension keeps the case of the offsets file's extension.
pub fn text_path_for(offsets: &Path) -> PathBuf {
    let upper = offsets
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| !e.is_empty() && e.chars().all(|c| !c.is_ascii_lowercase()));
    offsets.with_extension(if upper { "TXT" } else { "txt" })
}
