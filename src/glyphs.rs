use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps source characters onto the glyph slots of the in-game font.
///
/// The font only carries single-byte glyphs, so every letter of the source
/// alphabet is redirected to an ASCII slot whose bitmap was redrawn. Case is
/// not preserved: both cases of a letter land on the same slot.
pub trait GlyphMap {
    fn name(&self) -> &'static str;

    /// Returns the replacement for `ch`, or `None` when `ch` passes through.
    fn glyph(&self, ch: char) -> Option<char>;

    fn is_mapped(&self, ch: char) -> bool {
        self.glyph(ch).is_some()
    }

    /// Applies the map to a whole string, leaving unmapped characters as-is.
    fn translate(&self, text: &str) -> String {
        text.chars().map(|ch| self.glyph(ch).unwrap_or(ch)).collect()
    }
}

/// Source alphabet of the Russian translation and the font slot each letter
/// was painted into.
pub const CYRILLIC_GLYPHS: [(char, char); 66] = [
    ('а', 'a'), ('б', 'b'), ('в', 'B'), ('г', 'g'), ('д', 'd'),
    ('е', 'E'), ('ё', 'E'), ('ж', 'v'), ('з', 'z'), ('и', 'i'),
    ('й', 'j'), ('к', 'k'), ('л', 'l'), ('м', 'm'), ('н', 'H'),
    ('о', 'o'), ('п', 'p'), ('р', 'P'), ('с', 'C'), ('т', 't'),
    ('у', 'u'), ('ф', 'f'), ('х', 'X'), ('ц', 'c'), ('ч', 'h'),
    ('ш', '{'), ('щ', '}'), ('ъ', '\''), ('ы', 'y'), ('ь', 'x'),
    ('э', 'e'), ('ю', 'w'), ('я', 'q'),
    ('А', 'a'), ('Б', 'b'), ('В', 'B'), ('Г', 'g'), ('Д', 'd'),
    ('Е', 'E'), ('Ё', 'E'), ('Ж', 'v'), ('З', 'z'), ('И', 'i'),
    ('Й', 'j'), ('К', 'k'), ('Л', 'l'), ('М', 'm'), ('Н', 'H'),
    ('О', 'o'), ('П', 'p'), ('Р', 'P'), ('С', 'C'), ('Т', 't'),
    ('У', 'u'), ('Ф', 'f'), ('Х', 'X'), ('Ц', 'c'), ('Ч', 'h'),
    ('Ш', '{'), ('Щ', '}'), ('Ъ', '\''), ('Ы', 'y'), ('Ь', 'x'),
    ('Э', 'e'), ('Ю', 'w'), ('Я', 'q'),
];

static CYRILLIC_LOOKUP: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| CYRILLIC_GLYPHS.iter().copied().collect());

/// The fixed Cyrillic → font-slot table.
#[derive(Debug, Default, Clone, Copy)]
pub struct CyrillicGlyphs;

impl CyrillicGlyphs {
    pub fn new() -> Self {
        Self
    }

    /// Table entries in declaration order (lowercase first).
    pub fn entries(&self) -> &'static [(char, char)] {
        &CYRILLIC_GLYPHS
    }
}

impl GlyphMap for CyrillicGlyphs {
    fn name(&self) -> &'static str {
        "cyrillic"
    }

    fn glyph(&self, ch: char) -> Option<char> {
        CYRILLIC_LOOKUP.get(&ch).copied()
    }
}
