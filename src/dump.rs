// src/dump.rs
//
// Hex and ASCII renderings of byte buffers for diagnostic traces.
// Both are bounded so a large read never produces an unbounded log line.

/// Most bytes `hex_dump` renders (3 output characters each).
pub const HEX_DUMP_MAX_BYTES: usize = 340;

/// Most bytes `ascii_dump` renders.
pub const ASCII_DUMP_MAX_BYTES: usize = 1022;

/// Lowercase hex, each byte followed by a space: `"01 02 ff "`.
pub fn hex_dump(data: &[u8]) -> String {
    let shown = &data[..data.len().min(HEX_DUMP_MAX_BYTES)];
    let encoded = hex::encode(shown);

    let mut out = String::with_capacity(shown.len() * 3);
    for pair in encoded.as_bytes().chunks(2) {
        out.extend(pair.iter().map(|&c| c as char));
        out.push(' ');
    }
    out
}

/// Printable ASCII as-is, everything else as `.`.
pub fn ascii_dump(data: &[u8]) -> String {
    data.iter()
        .take(ASCII_DUMP_MAX_BYTES)
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect()
}
