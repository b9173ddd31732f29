use thiserror::Error;
use tracing::debug;

use crate::format::{Layout, OutputFormat};
use crate::line::{EncodeError, EncodedLine};
use crate::offsets::{OffsetOverflow, OffsetTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("line {line}: {source}")]
    Line {
        /// 1-based.
        line: usize,
        #[source]
        source: EncodeError,
    },
    #[error(transparent)]
    OffsetOverflow(#[from] OffsetOverflow),
}

/// Output bytes, shaped by the format's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Offset table followed by the text.
    Single(Vec<u8>),
    /// Offset table and text as two streams.
    Split { offsets: Vec<u8>, text: Vec<u8> },
}

impl Artifact {
    /// The buffer a hex dump is taken from: the whole file, or the offsets stream.
    pub fn primary(&self) -> &[u8] {
        match self {
            Artifact::Single(bytes) => bytes,
            Artifact::Split { offsets, .. } => offsets,
        }
    }

    pub fn total_len(&self) -> usize {
        match self {
            Artifact::Single(bytes) => bytes.len(),
            Artifact::Split { offsets, text } => offsets.len() + text.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub format: OutputFormat,
    pub lines: Vec<EncodedLine>,
    pub table: OffsetTable,
    pub artifact: Artifact,
}

impl Assembly {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Encoded text bytes, table excluded.
    pub fn data_len(&self) -> usize {
        self.lines.iter().map(EncodedLine::len).sum()
    }
}

/// Split script text into source lines on `\n`, `\r\n` or a bare `\r`.
/// A trailing line break does not start a new line.
pub fn split_source_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                lines.push(&text[start..pos]);
                pos += 1;
            }
            b'\r' => {
                lines.push(&text[start..pos]);
                pos += if bytes.get(pos + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            _ => {
                pos += 1;
                continue;
            }
        }
        start = pos;
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Encode every line and lay out table and text as `format` describes.
///
/// Fails on the first bad line; nothing is produced in that case.
pub fn assemble<S: AsRef<str>>(
    source_lines: &[S],
    format: &OutputFormat,
) -> Result<Assembly, AssembleError> {
    let encoder = format.encoder();
    let lines = source_lines
        .iter()
        .enumerate()
        .map(|(idx, source)| -> Result<EncodedLine, AssembleError> {
            let encoded = encoder
                .encode(source.as_ref())
                .map_err(|source| AssembleError::Line {
                    line: idx + 1,
                    source,
                })?;
            debug!(line = idx + 1, bytes = encoded.len(), "encoded line");
            Ok(encoded)
        })
        .collect::<Result<Vec<_>, AssembleError>>()?;

    let shift = format.shift(lines.len());
    let table = OffsetTable::from_lengths(lines.iter().map(EncodedLine::len), shift)?;
    let offsets = table.to_bytes(format.byte_order);
    let text: Vec<u8> = lines
        .iter()
        .flat_map(|line| line.as_bytes().iter().copied())
        .collect();

    let artifact = match format.layout {
        Layout::Interleaved => {
            let mut bytes = offsets;
            bytes.extend_from_slice(&text);
            Artifact::Single(bytes)
        }
        Layout::Split => Artifact::Split { offsets, text },
    };

    Ok(Assembly {
        format: format.clone(),
        lines,
        table,
        artifact,
    })
}

/// [`assemble`] over raw script text.
pub fn assemble_text(text: &str, format: &OutputFormat) -> Result<Assembly, AssembleError> {
    assemble(&split_source_lines(text), format)
}
