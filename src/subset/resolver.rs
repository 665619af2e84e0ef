use std::collections::HashSet;

use crate::models::{Config, FontPartition, FontProgram};
use crate::utils::log;

/// Partition the pool into fonts the scripts use and fonts they don't.
/// A font is included iff its name identity set shares at least one exact
/// string with the used-font-name set; no substring or case-insensitive
/// matching. The partition only filters, excluded fonts stay in the pool.
pub fn resolve_fonts(
    pool: &[FontProgram],
    used_fonts: &HashSet<String>,
    config: &Config,
) -> FontPartition {
    let mut included = Vec::new();
    let mut excluded = Vec::new();

    for font in pool {
        if font.names.iter().any(|name| used_fonts.contains(name)) {
            log(config, format!("Resolved font: {}", font.file_name()));
            included.push(font.clone());
        } else {
            excluded.push(font.clone());
        }
    }

    FontPartition { included, excluded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn font(file: &str, names: &[&str]) -> FontProgram {
        FontProgram {
            path: PathBuf::from(file),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn used(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn config() -> Config {
        Config::new(Path::new("."), false)
    }

    #[test]
    fn shared_name_includes_disjoint_excludes() {
        let pool = vec![
            font("sc.ttf", &["MyFontSC", "My Font SC"]),
            font("jp.ttf", &["MyFontJP"]),
        ];

        let partition = resolve_fonts(&pool, &used(&["MyFontSC"]), &config());
        assert_eq!(partition.included.len(), 1);
        assert_eq!(partition.included[0].file_name(), "sc.ttf");
        assert_eq!(partition.excluded.len(), 1);
        assert_eq!(partition.excluded[0].file_name(), "jp.ttf");
    }

    #[test]
    fn matching_is_exact_not_substring() {
        let pool = vec![font("sc.ttf", &["MyFontSC"])];

        let partition = resolve_fonts(&pool, &used(&["MyFont"]), &config());
        assert!(partition.included.is_empty());

        let partition = resolve_fonts(&pool, &used(&["myfontsc"]), &config());
        assert!(partition.included.is_empty());
    }

    #[test]
    fn resolution_is_order_independent() {
        let mut pool = vec![
            font("a.ttf", &["A"]),
            font("b.ttf", &["B"]),
            font("c.ttf", &["C"]),
        ];
        let wanted = used(&["A", "C"]);

        let forward = resolve_fonts(&pool, &wanted, &config());
        pool.reverse();
        let backward = resolve_fonts(&pool, &wanted, &config());

        let names = |fonts: &[FontProgram]| {
            let mut names: Vec<String> = fonts.iter().map(|f| f.file_name()).collect();
            names.sort();
            names
        };
        assert_eq!(names(&forward.included), names(&backward.included));
        assert_eq!(names(&forward.excluded), names(&backward.excluded));
    }

    #[test]
    fn font_with_empty_identity_never_matches() {
        let pool = vec![font("empty.ttf", &[])];
        let partition = resolve_fonts(&pool, &used(&["Anything"]), &config());
        assert!(partition.included.is_empty());
        assert_eq!(partition.excluded.len(), 1);
    }
}
