use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ttf_parser::{name::Name, name_id, Face, PlatformId};

use crate::error::{Error, Result};
use crate::models::Config;
use crate::utils::log;

/// Windows platform identifiers used for canonical name lookup
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_ENGLISH_US: u16 = 0x409;

/// Why a single name record could not be decoded
#[derive(Debug, PartialEq, Eq)]
pub enum NameDecodeError {
    /// Platform/encoding pair this reader does not decode
    UnsupportedEncoding,
    /// The record bytes are not valid for their declared encoding
    InvalidBytes,
    /// The record decodes to an empty string
    Empty,
}

/// Decode one name record to text.
/// Unicode-encoded records are decoded as UTF-16BE; Macintosh Roman records
/// are accepted for their ASCII subset. Anything else is unsupported.
pub fn decode_name_record(record: &Name) -> std::result::Result<String, NameDecodeError> {
    let decoded = if record.is_unicode() {
        record.to_string().ok_or(NameDecodeError::InvalidBytes)?
    } else if record.platform_id == PlatformId::Macintosh && record.encoding_id == 0 {
        if !record.name.is_ascii() {
            return Err(NameDecodeError::UnsupportedEncoding);
        }
        String::from_utf8(record.name.to_vec()).map_err(|_| NameDecodeError::InvalidBytes)?
    } else {
        return Err(NameDecodeError::UnsupportedEncoding);
    };

    if decoded.is_empty() {
        return Err(NameDecodeError::Empty);
    }
    Ok(decoded)
}

/// Collect every decodable name string of a face, across all platforms,
/// encodings and languages. Records that fail to decode are skipped; a face
/// with no decodable records yields an empty set, which simply never matches.
pub fn name_identity_set(face: &Face, config: &Config) -> HashSet<String> {
    let mut names = HashSet::new();

    for record in face.names() {
        match decode_name_record(&record) {
            Ok(name) => {
                names.insert(name);
            }
            Err(reason) => log(
                config,
                format!(
                    "Skipping name record (id {}, platform {:?}): {:?}",
                    record.name_id, record.platform_id, reason
                ),
            ),
        }
    }

    names
}

/// Read the name identity set of the font program at `path`
pub fn index_font_names(path: &Path, config: &Config) -> Result<HashSet<String>> {
    let data = fs::read(path)?;
    let face = Face::parse(&data, 0)
        .map_err(|e| Error::Font(format!("cannot parse {}: {}", path.display(), e)))?;
    Ok(name_identity_set(&face, config))
}

/// Look up a specific name record under the Windows / Unicode BMP /
/// US English triple, the combination renderers agree on
pub fn windows_english_name(face: &Face, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|record| {
            record.name_id == id
                && record.platform_id == PlatformId::Windows
                && record.encoding_id == WINDOWS_UNICODE_BMP
                && record.language_id == WINDOWS_ENGLISH_US
        })
        .and_then(|record| record.to_string())
        .filter(|name| !name.is_empty())
}

/// The PostScript name of a face, if it carries one
pub fn postscript_name(face: &Face) -> Option<String> {
    windows_english_name(face, name_id::POST_SCRIPT_NAME)
}

/// The full human-readable name of a face, if it carries one
pub fn full_name(face: &Face) -> Option<String> {
    windows_english_name(face, name_id::FULL_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testfont::{build_font, mac_record, raw_record, windows_record};

    fn config() -> Config {
        Config::new(Path::new("."), false)
    }

    #[test]
    fn collects_records_across_platforms() {
        let data = build_font(&[
            windows_record(name_id::POST_SCRIPT_NAME, "MyFontSC"),
            windows_record(name_id::FULL_NAME, "My Font SC"),
            mac_record(name_id::FAMILY, "My Font"),
        ]);
        let face = Face::parse(&data, 0).unwrap();

        let names = name_identity_set(&face, &config());
        assert_eq!(names.len(), 3);
        assert!(names.contains("MyFontSC"));
        assert!(names.contains("My Font SC"));
        assert!(names.contains("My Font"));
    }

    #[test]
    fn undecodable_record_does_not_abort_indexing() {
        // An unpaired surrogate is not valid UTF-16
        let data = build_font(&[
            raw_record(3, 1, 0x409, name_id::FULL_NAME, vec![0xD8, 0x00, 0x00, 0x41]),
            windows_record(name_id::POST_SCRIPT_NAME, "Survivor"),
        ]);
        let face = Face::parse(&data, 0).unwrap();

        let names = name_identity_set(&face, &config());
        assert_eq!(names.len(), 1);
        assert!(names.contains("Survivor"));
    }

    #[test]
    fn face_without_records_yields_empty_set() {
        let data = build_font(&[]);
        let face = Face::parse(&data, 0).unwrap();
        assert!(name_identity_set(&face, &config()).is_empty());
    }

    #[test]
    fn decode_rejects_unsupported_and_empty() {
        let data = build_font(&[
            raw_record(1, 1, 0, name_id::FULL_NAME, b"\x82\xa0".to_vec()),
            windows_record(name_id::POST_SCRIPT_NAME, ""),
        ]);
        let face = Face::parse(&data, 0).unwrap();
        let records: Vec<Name> = face.names().into_iter().collect();

        assert_eq!(
            decode_name_record(&records[0]),
            Err(NameDecodeError::UnsupportedEncoding)
        );
        assert_eq!(decode_name_record(&records[1]), Err(NameDecodeError::Empty));
    }

    #[test]
    fn canonical_lookup_requires_windows_english() {
        let data = build_font(&[
            mac_record(name_id::POST_SCRIPT_NAME, "MacOnlyName"),
            windows_record(name_id::FULL_NAME, "Windows Full"),
        ]);
        let face = Face::parse(&data, 0).unwrap();

        assert_eq!(postscript_name(&face), None);
        assert_eq!(full_name(&face), Some("Windows Full".to_string()));
    }
}
