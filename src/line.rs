//! Per-line codec: color markers, glyph mapping and terminators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyphs::{CyrillicGlyphs, GlyphMap};

/// Character that opens an inline color marker (`@RRGG`).
pub const MARKER_TRIGGER: char = '@';
/// Byte emitted in place of the trigger; the engine reads two raw bytes after it.
pub const MARKER_LEAD: u8 = 0xFF;
/// Trigger plus four hex digits.
pub const MARKER_LEN: usize = 5;
/// Default end-of-line byte.
pub const TERMINATOR: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFault {
    Truncated,
    InvalidHex,
}

impl std::fmt::Display for MarkerFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerFault::Truncated => write!(f, "expected four hex digits, line ends first"),
            MarkerFault::InvalidHex => write!(f, "expected four hex digits"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("malformed color marker '{marker}' at column {column}: {fault}")]
    MalformedColorMarker {
        column: usize,
        marker: String,
        fault: MarkerFault,
    },
    #[error("character '{ch}' (U+{code:04X}) at column {column} has no single-byte encoding")]
    NonEncodableCharacter { ch: char, code: u32, column: usize },
}

/// Replaces a source character with a raw control byte before glyph mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlChar {
    pub ch: char,
    pub byte: u8,
}

/// Bytes of one encoded line, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLine(Vec<u8>);

impl EncodedLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for lines produced by [`LineEncoder`]; the terminator is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Line content without its terminator.
    pub fn content(&self) -> &[u8] {
        self.0.split_last().map(|(_, rest)| rest).unwrap_or(&[])
    }

    pub fn terminator(&self) -> Option<u8> {
        self.0.last().copied()
    }
}

/// Encodes source lines into single-byte glyph strings.
///
/// Markers are expanded in one forward pass: the cursor skips the five marker
/// characters, so decoded color bytes never open another marker. Control
/// characters still apply to the decoded bytes.
#[derive(Debug, Clone)]
pub struct LineEncoder<G: GlyphMap = CyrillicGlyphs> {
    glyphs: G,
    controls: Vec<ControlChar>,
    terminator: u8,
}

impl LineEncoder<CyrillicGlyphs> {
    pub fn cyrillic() -> Self {
        Self::new(CyrillicGlyphs::new())
    }
}

impl Default for LineEncoder<CyrillicGlyphs> {
    fn default() -> Self {
        Self::cyrillic()
    }
}

impl<G: GlyphMap> LineEncoder<G> {
    pub fn new(glyphs: G) -> Self {
        Self {
            glyphs,
            controls: Vec::new(),
            terminator: TERMINATOR,
        }
    }

    pub fn with_controls(mut self, controls: impl IntoIterator<Item = ControlChar>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    /// Encode one line. At most one trailing line-feed is stripped first.
    pub fn encode(&self, source: &str) -> Result<EncodedLine, EncodeError> {
        let source = source.strip_suffix('\n').unwrap_or(source);
        let chars: Vec<char> = source.chars().collect();
        let mut bytes = Vec::with_capacity(chars.len() + 1);

        let mut cursor = 0;
        while cursor < chars.len() {
            let ch = chars[cursor];
            let column = cursor + 1;
            if ch == MARKER_TRIGGER {
                let [first, second] = parse_marker(&chars[cursor..], column)?;
                bytes.extend_from_slice(&[
                    MARKER_LEAD,
                    self.control_byte(first),
                    self.control_byte(second),
                ]);
                cursor += MARKER_LEN;
                continue;
            }
            bytes.push(self.encode_char(ch, column)?);
            cursor += 1;
        }

        bytes.push(self.terminator);
        Ok(EncodedLine(bytes))
    }

    /// Control substitution for a raw marker byte, matched by its Latin-1 character.
    fn control_byte(&self, raw: u8) -> u8 {
        self.controls
            .iter()
            .find(|c| u32::from(c.ch) == u32::from(raw))
            .map_or(raw, |c| c.byte)
    }

    fn encode_char(&self, ch: char, column: usize) -> Result<u8, EncodeError> {
        if let Some(control) = self.controls.iter().find(|c| c.ch == ch) {
            return Ok(control.byte);
        }
        let code = u32::from(self.glyphs.glyph(ch).unwrap_or(ch));
        u8::try_from(code).map_err(|_| EncodeError::NonEncodableCharacter { ch, code, column })
    }
}

/// Encode a line with the plain codec: Cyrillic glyphs, no control characters, `0x00` terminator.
pub fn encode_line(source: &str) -> Result<EncodedLine, EncodeError> {
    LineEncoder::cyrillic().encode(source)
}

/// `marker` starts at the trigger character.
fn parse_marker(marker: &[char], column: usize) -> Result<[u8; 2], EncodeError> {
    let text: String = marker.iter().take(MARKER_LEN).collect();
    let fail = |fault: MarkerFault| EncodeError::MalformedColorMarker {
        column,
        marker: text.clone(),
        fault,
    };
    if marker.len() < MARKER_LEN {
        return Err(fail(MarkerFault::Truncated));
    }
    let first = hex_pair(marker[1], marker[2]).ok_or_else(|| fail(MarkerFault::InvalidHex))?;
    let second = hex_pair(marker[3], marker[4]).ok_or_else(|| fail(MarkerFault::InvalidHex))?;
    Ok([first, second])
}

fn hex_pair(hi: char, lo: char) -> Option<u8> {
    let hi = hi.to_digit(16)?;
    let lo = lo.to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bytes(source: &str) -> Vec<u8> {
        encode_line(source).unwrap().into_bytes()
    }

    #[test]
    fn marker_expands_to_lead_and_raw_bytes() {
        assert_eq!(bytes("@4142"), vec![0xFF, 0x41, 0x42, 0x00]);
    }

    #[test]
    fn adjacent_markers_do_not_interfere() {
        assert_eq!(
            bytes("@0000@00FF"),
            vec![0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00]
        );
    }

    #[test]
    fn lowercase_hex_is_accepted() {
        assert_eq!(bytes("@0aff"), vec![0xFF, 0x0A, 0xFF, 0x00]);
    }

    #[test]
    fn decoded_trigger_byte_is_not_rescanned() {
        // 0x40 is '@'; the decoded pair must not open a new marker.
        assert_eq!(bytes("@4040x"), vec![0xFF, 0x40, 0x40, b'x', 0x00]);
    }

    #[test]
    fn text_around_markers_is_mapped() {
        assert_eq!(
            bytes("да@0102нет"),
            vec![b'd', b'a', 0xFF, 0x01, 0x02, b'H', b'E', b't', 0x00]
        );
    }

    #[test]
    fn strips_one_trailing_line_feed() {
        assert_eq!(bytes("ok\n"), vec![b'o', b'k', 0x00]);
        assert_eq!(bytes("ok\n\n"), vec![b'o', b'k', b'\n', 0x00]);
    }

    #[test]
    fn empty_line_is_just_a_terminator() {
        let line = encode_line("").unwrap();
        assert_eq!(line.as_bytes(), &[0x00]);
        assert!(line.content().is_empty());
        assert_eq!(line.terminator(), Some(0x00));
    }

    #[test]
    fn truncated_marker_is_rejected() {
        let err = encode_line("ab@12").unwrap_err();
        assert_eq!(
            err,
            EncodeError::MalformedColorMarker {
                column: 3,
                marker: "@12".to_string(),
                fault: MarkerFault::Truncated,
            }
        );
    }

    #[test]
    fn non_hex_marker_is_rejected() {
        let err = encode_line("@12zz tail").unwrap_err();
        assert!(matches!(
            err,
            EncodeError::MalformedColorMarker {
                column: 1,
                fault: MarkerFault::InvalidHex,
                ..
            }
        ));
        assert!(matches!(
            encode_line("@+1ff").unwrap_err(),
            EncodeError::MalformedColorMarker { .. }
        ));
    }

    #[test]
    fn latin1_passes_through() {
        assert_eq!(bytes("é"), vec![0xE9, 0x00]);
    }

    #[test]
    fn characters_beyond_latin1_are_rejected() {
        let err = encode_line("ok €").unwrap_err();
        assert_eq!(
            err,
            EncodeError::NonEncodableCharacter {
                ch: '€',
                code: 0x20AC,
                column: 4,
            }
        );
        assert!(err.to_string().contains("U+20AC"));
    }

    #[test]
    fn control_characters_and_terminator_are_configurable() {
        let encoder = LineEncoder::cyrillic()
            .with_controls([
                ControlChar { ch: '|', byte: 0x0A },
                ControlChar { ch: '#', byte: 0x0B },
            ])
            .with_terminator(0x0A);
        let line = encoder.encode("а|б#").unwrap();
        assert_eq!(line.as_bytes(), &[b'a', 0x0A, b'b', 0x0B, 0x0A]);
    }

    #[test]
    fn control_characters_apply_to_marker_payload() {
        let encoder = LineEncoder::cyrillic().with_controls([
            ControlChar { ch: '|', byte: 0x0A },
            ControlChar { ch: '#', byte: 0x0B },
        ]);
        // 0x7C is '|', 0x23 is '#'
        let line = encoder.encode("@7C23|").unwrap();
        assert_eq!(line.as_bytes(), &[0xFF, 0x0A, 0x0B, 0x0A, 0x00]);
        let plain = encoder.encode("@4142").unwrap();
        assert_eq!(plain.as_bytes(), &[0xFF, 0x41, 0x42, 0x00]);
    }
}
