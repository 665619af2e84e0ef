use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a subsetting run
#[derive(Clone)]
pub struct Config {
    /// Enable debug output
    pub debug_mode: bool,
    /// Directory holding the subtitle scripts
    pub subtitle_dir: PathBuf,
    /// Directory holding the shared font pool
    pub fonts_dir: PathBuf,
    /// Root directory under which per-episode workspaces are created
    pub subset_root: PathBuf,
    /// Name or path of the external glyph-subsetting tool
    pub subset_tool: String,
    /// Which scripts feed an episode's font resolution
    pub resolution_scope: ResolutionScope,
    /// Skip the external tool and only report resolution results
    pub skip_subsetting: bool,
}

/// Which part of the subtitle corpus drives one episode's font resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionScope {
    /// Only the episode's own scripts
    Episode,
    /// Every script in the run, regardless of episode
    Batch,
}

impl fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionScope::Episode => write!(f, "episode"),
            ResolutionScope::Batch => write!(f, "batch"),
        }
    }
}

impl Config {
    /// Create a configuration rooted at a project directory, using the
    /// standard subdirectory layout (ass/, fonts/, fonts_sub/)
    pub fn new(project_dir: &Path, debug_mode: bool) -> Self {
        Self {
            debug_mode,
            subtitle_dir: project_dir.join("ass"),
            fonts_dir: project_dir.join("fonts"),
            subset_root: project_dir.join("fonts_sub"),
            subset_tool: "pyftsubset".to_string(),
            resolution_scope: ResolutionScope::Episode,
            skip_subsetting: false,
        }
    }
}
