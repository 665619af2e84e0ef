use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str;

use crate::error::Result;
use crate::models::Config;
use crate::utils::{episode_number, log, sorted_files_with_extensions};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// One subtitle script, read once and never mutated
#[derive(Clone)]
pub struct SubtitleScript {
    /// Path the script was read from
    pub path: PathBuf,
    /// Decoded text lines. Lines that failed to decode are not present.
    pub lines: Vec<String>,
}

impl SubtitleScript {
    /// The file stem, for episode guessing and reporting
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Read a subtitle script, decoding line by line.
/// A line that is not valid UTF-8 is logged and skipped; it never fails the
/// whole script.
pub fn load_script(path: &Path, config: &Config) -> Result<SubtitleScript> {
    let raw = fs::read(path)?;
    let raw = raw.strip_prefix(&UTF8_BOM).unwrap_or(&raw);

    let mut lines = Vec::new();
    for (index, chunk) in raw.split(|&b| b == b'\n').enumerate() {
        let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
        match str::from_utf8(chunk) {
            Ok(text) => lines.push(text.to_string()),
            Err(_) => log(
                config,
                format!(
                    "Skipping undecodable line {} in {}",
                    index + 1,
                    path.display()
                ),
            ),
        }
    }

    Ok(SubtitleScript {
        path: path.to_path_buf(),
        lines,
    })
}

/// Load every .ass script in a directory, sorted lexicographically by file name
pub fn scan_scripts(dir: &Path, config: &Config) -> Result<Vec<SubtitleScript>> {
    let mut scripts = Vec::new();
    for path in sorted_files_with_extensions(dir, &["ass"])? {
        scripts.push(load_script(&path, config)?);
    }
    Ok(scripts)
}

/// Group scripts into episodes keyed by the number guessed from each file
/// stem. Scripts without a recognizable number land in episode "01".
pub fn group_by_episode(scripts: Vec<SubtitleScript>) -> BTreeMap<String, Vec<SubtitleScript>> {
    let mut episodes: BTreeMap<String, Vec<SubtitleScript>> = BTreeMap::new();
    for script in scripts {
        let episode = episode_number(&script.stem()).unwrap_or_else(|| "01".to_string());
        episodes.entry(episode).or_default().push(script);
    }
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn load_script_strips_bom_and_crlf() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(tmp.path(), false);
        let path = write_file(
            tmp.path(),
            "ep.ass",
            b"\xEF\xBB\xBF[Script Info]\r\nTitle: test\r\n",
        );

        let script = load_script(&path, &config).unwrap();
        assert_eq!(script.lines[0], "[Script Info]");
        assert_eq!(script.lines[1], "Title: test");
    }

    #[test]
    fn load_script_skips_undecodable_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(tmp.path(), false);
        let path = write_file(tmp.path(), "ep.ass", b"good line\n\xFF\xFE broken\nanother\n");

        let script = load_script(&path, &config).unwrap();
        assert!(script.lines.contains(&"good line".to_string()));
        assert!(script.lines.contains(&"another".to_string()));
        assert!(!script.lines.iter().any(|l| l.contains("broken")));
    }

    #[test]
    fn group_by_episode_uses_stem_numbers() {
        let scripts = vec![
            SubtitleScript {
                path: PathBuf::from("Show - 01 SC.ass"),
                lines: Vec::new(),
            },
            SubtitleScript {
                path: PathBuf::from("Show - 01 TC.ass"),
                lines: Vec::new(),
            },
            SubtitleScript {
                path: PathBuf::from("Show - 02 SC.ass"),
                lines: Vec::new(),
            },
            SubtitleScript {
                path: PathBuf::from("opening.ass"),
                lines: Vec::new(),
            },
        ];

        let episodes = group_by_episode(scripts);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes["01"].len(), 3);
        assert_eq!(episodes["02"].len(), 1);
    }
}
