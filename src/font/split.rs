use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use font_kit::font::Font;
use ttf_parser::{fonts_in_collection, Face};

use crate::error::{Error, Result};
use crate::font::names::{full_name, postscript_name};
use crate::models::Config;
use crate::utils::{log, sanitize_name};

const TTC_HEADER_LEN: usize = 12;
const OFFSET_TABLE_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;
const SFNT_VERSION_CFF: u32 = 0x4F54_544F; // 'OTTO'
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

fn get_u16(data: &[u8], offset: usize) -> Result<u16> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| Error::Font("truncated font data".to_string()))
}

fn get_u32(data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| Error::Font("truncated font data".to_string()))
}

/// Split a font collection into standalone font programs, one file per
/// embedded entry, written to `out_dir` in container order.
///
/// A file that is not a parseable collection yields an empty list and is not
/// an error; the caller moves on to other containers. A single embedded
/// entry that cannot be reserialized is logged and skipped without aborting
/// its siblings.
pub fn split_collection(path: &Path, out_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let data = fs::read(path)?;

    let count = match fonts_in_collection(&data) {
        Some(count) => count,
        None => {
            log(
                config,
                format!("{} is not a font collection, skipping", path.display()),
            );
            return Ok(Vec::new());
        }
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("collection");

    let mut written = Vec::new();
    let mut used_names = HashSet::new();

    for index in 0..count {
        match split_entry(&data, index, stem, &mut used_names) {
            Ok((file_name, bytes)) => {
                let out_path = out_dir.join(&file_name);
                match fs::write(&out_path, &bytes) {
                    Ok(()) => {
                        println!("[INFO] Split {} -> {}", path.display(), file_name);
                        written.push(out_path);
                    }
                    Err(e) => log(
                        config,
                        format!("Failed to write {}: {}", out_path.display(), e),
                    ),
                }
            }
            Err(e) => log(
                config,
                format!("Skipping entry {} of {}: {}", index, path.display(), e),
            ),
        }
    }

    Ok(written)
}

/// Derive the canonical file name for one entry and reserialize it.
/// Name precedence: PostScript name, then full name, then a stem-derived
/// fallback. Collisions within the container get an ordinal suffix so no
/// entry overwrites a previously split sibling.
fn split_entry(
    data: &[u8],
    index: u32,
    stem: &str,
    used_names: &mut HashSet<String>,
) -> Result<(String, Vec<u8>)> {
    let face = Face::parse(data, index)
        .map_err(|e| Error::Font(format!("entry {} does not parse: {}", index, e)))?;

    let base = postscript_name(&face)
        .or_else(|| full_name(&face))
        .map(|name| sanitize_name(&name))
        .unwrap_or_else(|| sanitize_name(&format!("{}_unknown", stem)));
    let name = reserve_name(base, used_names);

    let (bytes, extension) = extract_entry(data, index as usize)?;

    // The output must stand on its own as a loadable font program
    Face::parse(&bytes, 0)
        .map_err(|e| Error::Font(format!("reserialized entry {} does not parse: {}", index, e)))?;
    Font::from_bytes(Arc::new(bytes.clone()), 0)
        .map_err(|e| Error::Font(format!("reserialized entry {} does not load: {}", index, e)))?;

    Ok((format!("{}.{}", name, extension), bytes))
}

fn reserve_name(base: String, used_names: &mut HashSet<String>) -> String {
    let mut name = base.clone();
    let mut ordinal = 1;
    while used_names.contains(&name) {
        name = format!("{}_{}", base, ordinal);
        ordinal += 1;
    }
    used_names.insert(name.clone());
    name
}

/// Copy one entry's tables out of the collection and reassemble them as a
/// self-contained sfnt byte stream
fn extract_entry(data: &[u8], index: usize) -> Result<(Vec<u8>, &'static str)> {
    let subtable = get_u32(data, TTC_HEADER_LEN + 4 * index)? as usize;
    let sfnt_version = get_u32(data, subtable)?;
    let num_tables = get_u16(data, subtable + 4)? as usize;

    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let record = subtable + OFFSET_TABLE_LEN + i * TABLE_RECORD_LEN;
        let tag = data
            .get(record..record + 4)
            .ok_or_else(|| Error::Font("truncated table directory".to_string()))?;
        let offset = get_u32(data, record + 8)? as usize;
        let length = get_u32(data, record + 12)? as usize;

        let table = offset
            .checked_add(length)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| {
                Error::Font(format!(
                    "table {} is out of bounds",
                    String::from_utf8_lossy(tag)
                ))
            })?;

        tables.push(([tag[0], tag[1], tag[2], tag[3]], table.to_vec()));
    }

    let extension = if sfnt_version == SFNT_VERSION_CFF {
        "otf"
    } else {
        "ttf"
    };

    Ok((write_font_program(sfnt_version, tables), extension))
}

/// Assemble a standalone sfnt file from table data. Table bytes are copied
/// verbatim; the directory is rebuilt with fresh offsets and checksums,
/// tables are aligned on 4-byte boundaries, and head.checkSumAdjustment is
/// recomputed over the whole file.
pub(crate) fn write_font_program(sfnt_version: u32, mut tables: Vec<([u8; 4], Vec<u8>)>) -> Vec<u8> {
    // head's own checksum is defined over a zeroed checkSumAdjustment
    for (tag, data) in tables.iter_mut() {
        if tag == b"head" && data.len() >= 12 {
            data[8..12].fill(0);
        }
    }

    let num_tables = tables.len() as u16;
    let entry_selector = if num_tables == 0 {
        0
    } else {
        15 - num_tables.leading_zeros() as u16
    };
    let search_range = (1u16 << entry_selector).wrapping_mul(16);
    let range_shift = num_tables.wrapping_mul(16).saturating_sub(search_range);

    let mut output = Vec::new();
    output.extend_from_slice(&sfnt_version.to_be_bytes());
    output.extend_from_slice(&num_tables.to_be_bytes());
    output.extend_from_slice(&search_range.to_be_bytes());
    output.extend_from_slice(&entry_selector.to_be_bytes());
    output.extend_from_slice(&range_shift.to_be_bytes());

    let mut offset = OFFSET_TABLE_LEN + tables.len() * TABLE_RECORD_LEN;
    let mut head_offset = None;
    for (tag, data) in &tables {
        output.extend_from_slice(tag);
        output.extend_from_slice(&table_checksum(data).to_be_bytes());
        output.extend_from_slice(&(offset as u32).to_be_bytes());
        output.extend_from_slice(&(data.len() as u32).to_be_bytes());
        if tag == b"head" {
            head_offset = Some(offset);
        }
        offset += padded_len(data.len());
    }

    // The directory size is a multiple of 4, so aligning on the absolute
    // file position keeps every table at its directory offset
    for (_, data) in &tables {
        output.extend_from_slice(data);
        output.resize(padded_len(output.len()), 0);
    }

    if let Some(head) = head_offset {
        let adjustment = CHECKSUM_MAGIC.wrapping_sub(table_checksum(&output));
        if head + 12 <= output.len() {
            output[head + 8..head + 12].copy_from_slice(&adjustment.to_be_bytes());
        }
    }

    output
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// Standard sfnt checksum: the big-endian u32 sum of the data, with the
/// trailing partial word zero-padded
pub(crate) fn table_checksum(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        sum = sum.wrapping_add(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut last = [0u8; 4];
        last[..remainder.len()].copy_from_slice(remainder);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }

    sum
}
