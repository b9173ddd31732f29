//! Cumulative 16-bit offset tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size in bytes of one serialized table entry.
pub const ENTRY_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn write_u16(self, value: u16) -> [u8; ENTRY_SIZE] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little-endian"),
            ByteOrder::Big => write!(f, "big-endian"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("offset table entry {index} is {value}, which does not fit in 16 bits")]
pub struct OffsetOverflow {
    pub index: usize,
    pub value: usize,
}

/// Start offset of every line plus the end of the data, all shifted by the
/// same constant.
///
/// For N lines the table holds N+1 entries. Only the first N are written out;
/// the last one is the total data length and is kept for callers that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    entries: Vec<u16>,
    shift: usize,
}

impl OffsetTable {
    /// Running sum over `lengths`, starting at `shift`.
    pub fn from_lengths<I>(lengths: I, shift: usize) -> Result<Self, OffsetOverflow>
    where
        I: IntoIterator<Item = usize>,
    {
        let lengths = lengths.into_iter();
        let mut entries = Vec::with_capacity(lengths.size_hint().0 + 1);
        let mut position = shift;
        entries.push(narrow(0, position)?);
        for (idx, len) in lengths.enumerate() {
            position += len;
            entries.push(narrow(idx + 1, position)?);
        }
        Ok(Self { entries, shift })
    }

    /// Bytes taken by the emitted part of a table for `line_count` lines.
    pub fn byte_size(line_count: usize) -> usize {
        line_count * ENTRY_SIZE
    }

    /// All N+1 entries, shift included.
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// The N per-line start offsets that get serialized.
    pub fn starts(&self) -> &[u16] {
        &self.entries[..self.line_count()]
    }

    /// End of the data, shift included.
    pub fn end(&self) -> u16 {
        self.entries[self.line_count()]
    }

    pub fn shift(&self) -> usize {
        self.shift
    }

    pub fn line_count(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        self.starts()
            .iter()
            .flat_map(|&entry| order.write_u16(entry))
            .collect()
    }
}

fn narrow(index: usize, value: usize) -> Result<u16, OffsetOverflow> {
    u16::try_from(value).map_err(|_| OffsetOverflow { index, value })
}

/// Offsets for already-encoded lines, serialized in `order`.
pub fn build_offset_table<T: AsRef<[u8]>>(
    lines: &[T],
    shift: usize,
    order: ByteOrder,
) -> Result<Vec<u8>, OffsetOverflow> {
    let table = OffsetTable::from_lengths(lines.iter().map(|l| l.as_ref().len()), shift)?;
    Ok(table.to_bytes(order))
}
