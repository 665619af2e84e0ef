use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::subtitle::script::SubtitleScript;

lazy_static! {
    // Second comma-delimited field of a style declaration is the font family
    static ref STYLE_FONT_RE: Regex = Regex::new(r"^Style:\s*[^,]+,([^,]+)").unwrap();
    // Inline override directive, e.g. {\fnNoto Sans}
    static ref OVERRIDE_FONT_RE: Regex = Regex::new(r"\\fn([^\\}]+)").unwrap();
}

/// Collect every font family name the scripts actually reference, from both
/// style declarations and inline overrides. Names are trimmed but kept
/// case-sensitive; matching against font identities is exact.
pub fn extract_used_fonts(scripts: &[SubtitleScript]) -> HashSet<String> {
    let mut used = HashSet::new();

    for script in scripts {
        for line in &script.lines {
            if let Some(caps) = STYLE_FONT_RE.captures(line) {
                used.insert(caps[1].trim().to_string());
            }

            for caps in OVERRIDE_FONT_RE.captures_iter(line) {
                used.insert(caps[1].trim().to_string());
            }
        }
    }

    used
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
    fn style_declarations_contribute_second_field() {
        let scripts = [script(&[
            "Style: Default,MyFontSC,70,&H00FFFFFF,&H000000FF",
            "Style: Sign, Noto Sans CJK SC ,48",
        ])];

        let used = extract_used_fonts(&scripts);
        assert!(used.contains("MyFontSC"));
        assert!(used.contains("Noto Sans CJK SC"));
    }

    #[test]
    fn inline_overrides_contribute_their_argument() {
        let scripts = [script(&[
            r"Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\fnNotoSansCJK-Bold}text",
        ])];

        let used = extract_used_fonts(&scripts);
        assert!(used.contains("NotoSansCJK-Bold"));
    }

    #[test]
    fn multiple_overrides_in_one_line() {
        let scripts = [script(&[
            r"Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\fnFontA\b1}a{\fnFont B}b",
        ])];

        let used = extract_used_fonts(&scripts);
        assert!(used.contains("FontA"));
        assert!(used.contains("Font B"));
    }

    #[test]
    fn extraction_is_case_sensitive_and_deduplicated() {
        let scripts = [script(&[
            "Style: A,MyFontSC,1",
            "Style: B,MyFontSC,1",
            "Style: C,myfontsc,1",
        ])];

        let used = extract_used_fonts(&scripts);
        assert_eq!(used.len(), 2);
        assert!(used.contains("MyFontSC"));
        assert!(used.contains("myfontsc"));
    }

    #[test]
    fn dialogue_without_fonts_contributes_nothing() {
        let scripts = [script(&["Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,plain text"])];
        assert!(extract_used_fonts(&scripts).is_empty());
    }
}
