use std::collections::HashSet;
use std::path::PathBuf;

/// One standalone, loadable font program from the pool
#[derive(Clone)]
pub struct FontProgram {
    /// Path of the font file on disk
    pub path: PathBuf,
    /// Every name string the font is known by, read from its name table
    pub names: HashSet<String>,
}

impl FontProgram {
    /// The file name, for reporting
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Resolver output: the pool split into used and unused fonts
pub struct FontPartition {
    /// Fonts referenced by at least one used font name
    pub included: Vec<FontProgram>,
    /// Fonts with no name in the used set, kept in the pool but not bundled
    pub excluded: Vec<FontProgram>,
}
