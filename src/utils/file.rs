use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Config;
use crate::utils::logging::log;

/// Create a directory if it doesn't exist
pub fn ensure_directory_exists(dir: &Path, config: &Config) -> Result<()> {
    if !dir.exists() {
        log(
            config,
            format!("Directory {} does not exist. Creating it now.", dir.display()),
        );
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Delete everything inside a directory, leaving the directory itself
pub fn clear_directory(dir: &Path, config: &Config) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        log(config, format!("Removing stale entry {}", path.display()));
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// List the files in a directory whose lowercased extension is in `extensions`,
/// sorted lexicographically by file name so that repeated runs see the same
/// order regardless of how the filesystem enumerates entries.
pub fn sorted_files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if extensions.contains(&ext.as_str()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;
    use std::fs::File;
    use std::io::Write;

    fn test_config(dir: &Path) -> Config {
        Config::new(dir, false)
    }

    #[test]
    fn clear_directory_removes_files_and_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());

        File::create(tmp.path().join("stale.ttf")).unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        File::create(tmp.path().join("nested/inner.txt")).unwrap();

        clear_directory(tmp.path(), &config).unwrap();

        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
        assert!(tmp.path().exists());
    }

    #[test]
    fn sorted_files_filters_and_orders() {
        let tmp = tempfile::tempdir().unwrap();

        for name in ["b.ttf", "a.otf", "c.txt", "d.TTF"] {
            let mut f = File::create(tmp.path().join(name)).unwrap();
            f.write_all(b"x").unwrap();
        }
        fs::create_dir(tmp.path().join("sub.ttf")).unwrap();

        let files = sorted_files_with_extensions(tmp.path(), &["ttf", "otf"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.otf", "b.ttf", "d.TTF"]);
    }
}
