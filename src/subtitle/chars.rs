use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::subtitle::script::SubtitleScript;

/// Collect every code point the subset fonts must be able to render.
/// Retains all characters >= U+0020 seen in any script line, then adds the
/// printable ASCII range as a floor so the set is never empty.
pub fn collect_glyph_requirements(scripts: &[SubtitleScript]) -> BTreeSet<char> {
    let mut chars = BTreeSet::new();

    for script in scripts {
        for line in &script.lines {
            for ch in line.chars() {
                if ch as u32 >= 0x20 {
                    chars.insert(ch);
                }
            }
        }
    }

    // ASCII floor, 0x20..=0x7E
    for code in 0x20u8..=0x7E {
        chars.insert(char::from(code));
    }

    chars
}

/// Persist the requirement set as a text blob for the external subsetting
/// tool. BTreeSet iteration keeps the output sorted by code point, so
/// identical input reproduces an identical blob.
pub fn write_requirement_blob(chars: &BTreeSet<char>, path: &Path) -> Result<()> {
    if chars.is_empty() {
        return Err(Error::Subtitle(
            "glyph requirement set is empty, the ASCII floor is missing".to_string(),
        ));
    }

    let blob: String = chars.iter().collect();
    fs::write(path, blob.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn script(lines: &[&str]) -> SubtitleScript {
        SubtitleScript {
            path: PathBuf::from("test.ass"),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn requirement_set_is_superset_of_printable_ascii() {
        let chars = collect_glyph_requirements(&[]);
        for code in 0x20u8..=0x7E {
            assert!(chars.contains(&char::from(code)));
        }
        assert!(!chars.contains(&'\t'));
        assert!(!chars.contains(&char::from(0x7Fu8)));
    }

    #[test]
    fn requirement_set_keeps_observed_code_points() {
        let scripts = [script(&["Dialogue: 0,text,中文テスト", "Style: x,y"])];
        let chars = collect_glyph_requirements(&scripts);
        assert!(chars.contains(&'中'));
        assert!(chars.contains(&'テ'));
        assert!(chars.contains(&'y'));
    }

    #[test]
    fn control_characters_are_excluded() {
        let scripts = [script(&["a\u{1}b\u{1F}c"])];
        let chars = collect_glyph_requirements(&scripts);
        assert!(chars.contains(&'a'));
        assert!(!chars.contains(&'\u{1}'));
        assert!(!chars.contains(&'\u{1F}'));
    }

    #[test]
    fn blob_is_sorted_and_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let scripts = [script(&["zebra", "日本語", "Apple"])];

        let first = tmp.path().join("chars_a.txt");
        let second = tmp.path().join("chars_b.txt");
        write_requirement_blob(&collect_glyph_requirements(&scripts), &first).unwrap();
        write_requirement_blob(&collect_glyph_requirements(&scripts), &second).unwrap();

        let a = fs::read(&first).unwrap();
        let b = fs::read(&second).unwrap();
        assert_eq!(a, b);

        let text = String::from_utf8(a).unwrap();
        let codes: Vec<u32> = text.chars().map(|c| c as u32).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
