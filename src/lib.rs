//! Compiler for glyph-mapped game string tables.
//!
//! A script is one string per line. Each line is mapped onto the font's glyph
//! slots, inline `@RRGG` color markers are expanded to raw bytes, and the
//! strings are laid out behind a table of 16-bit offsets.

mod assemble;
mod format;
mod glyphs;
mod hexdump;
mod line;
mod manifest;
mod offsets;

pub use assemble::{
    Artifact, AssembleError, Assembly, assemble, assemble_text, split_source_lines,
};
pub use format::{FormatError, Layout, OutputFormat, text_path_for};
pub use glyphs::{CYRILLIC_GLYPHS, CyrillicGlyphs, GlyphMap};
pub use hexdump::{ROW_WIDTH, hex_dump};
pub use line::{
    ControlChar, EncodeError, EncodedLine, LineEncoder, MARKER_LEAD, MARKER_TRIGGER, MarkerFault,
    TERMINATOR, encode_line,
};
pub use manifest::{BuildManifest, OutputRecord, sha256_hex};
pub use offsets::{ByteOrder, OffsetOverflow, OffsetTable, build_offset_table};
