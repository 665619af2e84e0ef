use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SANITIZE_RE: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
    static ref EPISODE_RE: Regex = Regex::new(r"\b(\d{2,3})\b").unwrap();
}

/// Marker substring in subset artifact file names. The downstream muxer
/// globs for this to select attachable fonts, so it must not change.
pub const SUBSET_MARKER: &str = "subset";

/// Clean a font name for use in filenames.
/// Every run of characters outside [A-Za-z0-9._-] becomes a single underscore.
pub fn sanitize_name(name: &str) -> String {
    let cleaned = SANITIZE_RE.replace_all(name, "_").into_owned();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Build the artifact file name for a subset of the given source font
pub fn subset_artifact_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font");
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("ttf")
        .to_lowercase();

    format!("{}.{}.{}", stem, SUBSET_MARKER, extension)
}

/// Guess an episode number from a file stem.
/// The first standalone 2-3 digit group wins.
pub fn episode_number(stem: &str) -> Option<String> {
    EPISODE_RE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
