use std::path::Path;

/// A tiny TrueType-flavoured sfnt: a table directory with a single zeroed
/// `head` table. Enough for source validation, not for rendering.
pub fn minimal_ttf(seed: u8) -> Vec<u8> {
    const HEADER_LEN: u32 = 12;
    const RECORD_LEN: u32 = 16;
    const HEAD_LEN: u32 = 54;

    let mut font = Vec::new();
    font.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // sfnt version
    font.extend_from_slice(&1u16.to_be_bytes()); // numTables
    font.extend_from_slice(&[0; 6]); // searchRange, entrySelector, rangeShift

    font.extend_from_slice(b"head");
    font.extend_from_slice(&0u32.to_be_bytes()); // checksum
    font.extend_from_slice(&(HEADER_LEN + RECORD_LEN).to_be_bytes());
    font.extend_from_slice(&HEAD_LEN.to_be_bytes());

    let mut head = vec![0u8; HEAD_LEN as usize];
    head[4] = seed; // fontRevision, makes each source distinct
    font.extend_from_slice(&head);
    font
}

/// Writes `<name>.ttf` for every name into `dir`.
pub fn write_sources(dir: &Path, names: &[&str]) {
    for (index, name) in names.iter().enumerate() {
        std::fs::write(dir.join(format!("{name}.ttf")), minimal_ttf(index as u8)).unwrap();
    }
}
