//! Glyph table listing (`stringtab charmap`).

use anyhow::Result;
use stringtab::{CyrillicGlyphs, GlyphMap};

pub fn handle() -> Result<()> {
    let glyphs = CyrillicGlyphs::new();
    println!("Glyph map: {}", glyphs.name());
    for (source, slot) in glyphs.entries() {
        println!("  {} -> {:?} (0x{:02X})", source, slot, u32::from(*slot));
    }
    Ok(())
}
