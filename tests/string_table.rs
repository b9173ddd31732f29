use pretty_assertions::assert_eq;
use stringtab::{
    Artifact, AssembleError, ByteOrder, CYRILLIC_GLYPHS, EncodeError, GlyphMap, Layout,
    OutputFormat, assemble, assemble_text, encode_line, hex_dump,
};

const SCRIPT: &str = "Привет, Лестер!\n@0F01Ты где?|Я здесь.\n\n#Конец\n";

#[test]
fn offsets_track_encoded_lengths() {
    let assembly = assemble_text(SCRIPT, &OutputFormat::bin()).unwrap();
    let entries = assembly.table.entries();
    assert_eq!(entries.len(), assembly.line_count() + 1);
    assert_eq!(entries[0], 0);
    let mut sum = 0;
    for (i, line) in assembly.lines.iter().enumerate() {
        assert_eq!(entries[i] as usize, sum);
        sum += line.len();
    }
    assert_eq!(*entries.last().unwrap() as usize, sum);
}

#[test]
fn every_line_ends_with_the_format_terminator() {
    for (format, terminator) in [(OutputFormat::tbn(), 0x00), (OutputFormat::bin(), 0x0A)] {
        let assembly = assemble_text(SCRIPT, &format).unwrap();
        for line in &assembly.lines {
            assert_eq!(line.terminator(), Some(terminator), "{}", format.name);
        }
    }
}

#[test]
fn tbn_file_is_self_addressed() {
    let assembly = assemble_text(SCRIPT, &OutputFormat::tbn()).unwrap();
    let Artifact::Single(bytes) = assembly.artifact else {
        panic!("tbn is a single file");
    };
    let count = assembly.lines.len();
    assert_eq!(count, 4);
    for (i, line) in assembly.lines.iter().enumerate() {
        let start = u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]) as usize;
        assert!(start >= count * 2);
        assert_eq!(&bytes[start..start + line.len()], line.as_bytes());
    }
}

#[test]
fn bin_offsets_are_big_endian_and_unshifted() {
    let assembly = assemble(&["аб", "в"], &OutputFormat::bin()).unwrap();
    let Artifact::Split { offsets, text } = assembly.artifact else {
        panic!("bin is split");
    };
    assert_eq!(offsets, vec![0x00, 0x00, 0x00, 0x03]);
    assert_eq!(text, b"ab\nB\n".to_vec());
}

#[test]
fn control_characters_only_apply_to_tbn() {
    let tbn = assemble(&["а|б#"], &OutputFormat::tbn()).unwrap();
    assert_eq!(tbn.lines[0].as_bytes(), &[b'a', 0x0A, b'b', 0x0B, 0x00]);
    let bin = assemble(&["а|б#"], &OutputFormat::bin()).unwrap();
    assert_eq!(bin.lines[0].as_bytes(), b"a|b#\n");
}

#[test]
fn tbn_controls_rewrite_marker_payload_bytes() {
    let tbn = assemble(&["@7C23"], &OutputFormat::tbn()).unwrap();
    assert_eq!(tbn.lines[0].as_bytes(), &[0xFF, 0x0A, 0x0B, 0x00]);
    let bin = assemble(&["@7C23"], &OutputFormat::bin()).unwrap();
    assert_eq!(bin.lines[0].as_bytes(), &[0xFF, 0x7C, 0x23, 0x0A]);
}

#[test]
fn single_line_tbn_matches_reference_bytes() {
    let assembly = assemble(&["а|б"], &OutputFormat::tbn()).unwrap();
    assert_eq!(
        assembly.artifact,
        Artifact::Single(vec![0x02, 0x00, b'a', 0x0A, b'b', 0x00])
    );
}

#[test]
fn markers_and_glyphs_mix() {
    assert_eq!(
        encode_line("@4142").unwrap().as_bytes(),
        &[0xFF, 0x41, 0x42, 0x00]
    );
    assert_eq!(
        encode_line("@0000@00FF").unwrap().as_bytes(),
        &[0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00]
    );
}

#[test]
fn glyph_table_is_complete() {
    let glyphs = stringtab::CyrillicGlyphs::new();
    assert_eq!(CYRILLIC_GLYPHS.len(), 66);
    for (source, slot) in CYRILLIC_GLYPHS {
        let encoded = encode_line(&source.to_string()).unwrap();
        assert_eq!(encoded.as_bytes(), &[slot as u8, 0x00], "{source}");
        assert!(!glyphs.is_mapped(slot));
    }
}

#[test]
fn malformed_marker_fails_the_whole_build() {
    let err = assemble_text("fine\nbroken @12\nfine\n", &OutputFormat::tbn()).unwrap_err();
    match err {
        AssembleError::Line { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(source, EncodeError::MalformedColorMarker { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_latin1_text_is_rejected() {
    let err = assemble_text("日本", &OutputFormat::bin()).unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn empty_script() {
    for format in [OutputFormat::tbn(), OutputFormat::bin()] {
        let assembly = assemble_text("", &format).unwrap();
        assert_eq!(assembly.table.entries(), &[0]);
        assert_eq!(assembly.artifact.total_len(), 0);
    }
}

#[test]
fn custom_format_descriptor() {
    let format = OutputFormat {
        name: "be-interleaved".to_string(),
        byte_order: ByteOrder::Big,
        layout: Layout::Interleaved,
        terminator: 0x00,
        controls: Vec::new(),
    };
    let assembly = assemble(&["a", "b"], &format).unwrap();
    assert_eq!(
        assembly.artifact,
        Artifact::Single(vec![0x00, 0x04, 0x00, 0x06, b'a', 0x00, b'b', 0x00])
    );
}

#[test]
fn hex_projection_of_tbn() {
    let assembly = assemble(&["а|б"], &OutputFormat::tbn()).unwrap();
    assert_eq!(
        hex_dump(assembly.artifact.primary()),
        "0x02, 0x00, 0x61, 0x0A, 0x62, 0x00,\n"
    );
}
