use std::fmt::Write;

/// Values per row of a hex dump.
pub const ROW_WIDTH: usize = 16;

/// Render `bytes` as a C-style array body: `0xHH, 0xHH, ...,` with
/// [`ROW_WIDTH`] values per row. Every row ends with a comma and a newline.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 6);
    for row in bytes.chunks(ROW_WIDTH) {
        for (i, byte) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write!(&mut out, "0x{byte:02X}").ok();
        }
        out.push_str(",\n");
    }
    out
}
