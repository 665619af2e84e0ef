//! Minimal sfnt builders shared by the font tests.
//! The fonts carry one empty glyph and whatever name records a test needs,
//! which is enough for both ttf-parser and the loader to accept them.

use crate::font::split::write_font_program;

/// (platform, encoding, language, name id, raw string bytes)
pub(crate) type NameRecord = (u16, u16, u16, u16, Vec<u8>);

pub(crate) fn windows_record(name_id: u16, value: &str) -> NameRecord {
    let bytes = value
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    (3, 1, 0x409, name_id, bytes)
}

pub(crate) fn mac_record(name_id: u16, value: &str) -> NameRecord {
    (1, 0, 0, name_id, value.as_bytes().to_vec())
}

pub(crate) fn raw_record(
    platform: u16,
    encoding: u16,
    language: u16,
    name_id: u16,
    bytes: Vec<u8>,
) -> NameRecord {
    (platform, encoding, language, name_id, bytes)
}

fn name_table(records: &[NameRecord]) -> Vec<u8> {
    let mut table = Vec::new();
    table.extend_from_slice(&0u16.to_be_bytes());
    table.extend_from_slice(&(records.len() as u16).to_be_bytes());
    table.extend_from_slice(&((6 + records.len() * 12) as u16).to_be_bytes());

    let mut storage: Vec<u8> = Vec::new();
    for (platform, encoding, language, name_id, bytes) in records {
        table.extend_from_slice(&platform.to_be_bytes());
        table.extend_from_slice(&encoding.to_be_bytes());
        table.extend_from_slice(&language.to_be_bytes());
        table.extend_from_slice(&name_id.to_be_bytes());
        table.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        table.extend_from_slice(&(storage.len() as u16).to_be_bytes());
        storage.extend_from_slice(bytes);
    }

    table.extend_from_slice(&storage);
    table
}

fn head_table() -> Vec<u8> {
    let mut head = Vec::new();
    head.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    head.extend_from_slice(&0u32.to_be_bytes()); // fontRevision
    head.extend_from_slice(&0u32.to_be_bytes()); // checkSumAdjustment
    head.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    head.extend_from_slice(&0u16.to_be_bytes()); // flags
    head.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    head.extend_from_slice(&[0u8; 16]); // created + modified
    head.extend_from_slice(&[0u8; 8]); // xMin..yMax
    head.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    head.extend_from_slice(&8u16.to_be_bytes()); // lowestRecPPEM
    head.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
    head.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat
    head.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
    head
}

fn hhea_table() -> Vec<u8> {
    let mut hhea = Vec::new();
    hhea.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    hhea.extend_from_slice(&800i16.to_be_bytes()); // ascender
    hhea.extend_from_slice(&(-200i16).to_be_bytes()); // descender
    hhea.extend_from_slice(&0i16.to_be_bytes()); // lineGap
    hhea.extend_from_slice(&500u16.to_be_bytes()); // advanceWidthMax
    hhea.extend_from_slice(&[0u8; 6]); // min side bearings, xMaxExtent
    hhea.extend_from_slice(&1i16.to_be_bytes()); // caretSlopeRise
    hhea.extend_from_slice(&0i16.to_be_bytes()); // caretSlopeRun
    hhea.extend_from_slice(&[0u8; 10]); // caretOffset + reserved
    hhea.extend_from_slice(&0i16.to_be_bytes()); // metricDataFormat
    hhea.extend_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    hhea
}

fn maxp_table() -> Vec<u8> {
    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version 1.0
    maxp.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    maxp.extend_from_slice(&[0u8; 26]); // limits, all zero
    maxp
}

fn cmap_table() -> Vec<u8> {
    let mut cmap = Vec::new();
    cmap.extend_from_slice(&0u16.to_be_bytes()); // version
    cmap.extend_from_slice(&1u16.to_be_bytes()); // numTables
    cmap.extend_from_slice(&3u16.to_be_bytes()); // platformID
    cmap.extend_from_slice(&1u16.to_be_bytes()); // encodingID
    cmap.extend_from_slice(&12u32.to_be_bytes()); // subtable offset

    // Format 4 subtable with only the 0xFFFF terminator segment
    cmap.extend_from_slice(&4u16.to_be_bytes()); // format
    cmap.extend_from_slice(&24u16.to_be_bytes()); // length
    cmap.extend_from_slice(&0u16.to_be_bytes()); // language
    cmap.extend_from_slice(&2u16.to_be_bytes()); // segCountX2
    cmap.extend_from_slice(&2u16.to_be_bytes()); // searchRange
    cmap.extend_from_slice(&0u16.to_be_bytes()); // entrySelector
    cmap.extend_from_slice(&0u16.to_be_bytes()); // rangeShift
    cmap.extend_from_slice(&0xFFFFu16.to_be_bytes()); // endCode
    cmap.extend_from_slice(&0u16.to_be_bytes()); // reservedPad
    cmap.extend_from_slice(&0xFFFFu16.to_be_bytes()); // startCode
    cmap.extend_from_slice(&1u16.to_be_bytes()); // idDelta
    cmap.extend_from_slice(&0u16.to_be_bytes()); // idRangeOffset
    cmap
}

/// Build a complete single-glyph font carrying the given name records
pub(crate) fn build_font(records: &[NameRecord]) -> Vec<u8> {
    let hmtx = {
        let mut hmtx = Vec::new();
        hmtx.extend_from_slice(&500u16.to_be_bytes());
        hmtx.extend_from_slice(&0i16.to_be_bytes());
        hmtx
    };

    // Directory tags must stay sorted
    let mut tables = vec![
        (*b"cmap", cmap_table()),
        (*b"glyf", vec![0u8; 4]),
        (*b"head", head_table()),
        (*b"hhea", hhea_table()),
        (*b"hmtx", hmtx),
        (*b"loca", vec![0u8; 4]),
        (*b"maxp", maxp_table()),
    ];
    if !records.is_empty() {
        tables.push((*b"name", name_table(records)));
    }

    write_font_program(0x0001_0000, tables)
}

/// Wrap standalone fonts into a collection file, rebasing each entry's
/// table offsets to be absolute within the collection
pub(crate) fn build_collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());

    let mut base = 12 + 4 * fonts.len();
    for font in fonts {
        out.extend_from_slice(&(base as u32).to_be_bytes());
        base += font.len();
    }

    for font in fonts {
        let base = out.len() as u32;
        let mut blob = font.clone();
        let num_tables = u16::from_be_bytes([blob[4], blob[5]]) as usize;
        for i in 0..num_tables {
            let field = 12 + i * 16 + 8;
            let offset = u32::from_be_bytes([
                blob[field],
                blob[field + 1],
                blob[field + 2],
                blob[field + 3],
            ]);
            blob[field..field + 4].copy_from_slice(&(offset + base).to_be_bytes());
        }
        out.extend_from_slice(&blob);
    }

    out
}
