use std::fs;
use std::path::Path;

use ttf_parser::Face;

use crate::error::Result;
use crate::font::names::index_font_names;
use crate::models::{Config, FontProgram};
use crate::utils::{log, sorted_files_with_extensions};

const TTF_MAGIC: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
const OTF_MAGIC: [u8; 4] = [0x4F, 0x54, 0x54, 0x4F];

/// Check if a file is a valid standalone font program
pub fn is_valid_font_file(path: &Path, config: &Config) -> bool {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(_) => {
            log(config, format!("Unreadable font file: {}", path.display()));
            return false;
        }
    };

    let is_valid_magic = data.len() >= 4 && (data[0..4] == TTF_MAGIC || data[0..4] == OTF_MAGIC);
    if is_valid_magic && Face::parse(&data, 0).is_ok() {
        log(config, format!("Valid font file: {}", path.display()));
        return true;
    }

    log(config, format!("Invalid font file: {}", path.display()));
    false
}

/// Scan the shared font pool for standalone programs, sorted
/// lexicographically by file name, and read each one's name identity set
pub fn scan_font_pool(dir: &Path, config: &Config) -> Result<Vec<FontProgram>> {
    let mut pool = Vec::new();

    for path in sorted_files_with_extensions(dir, &["ttf", "otf"])? {
        if !is_valid_font_file(&path, config) {
            continue;
        }

        match index_font_names(&path, config) {
            Ok(names) => pool.push(FontProgram { path, names }),
            Err(e) => log(config, format!("Skipping {}: {}", path.display(), e)),
        }
    }

    Ok(pool)
}
