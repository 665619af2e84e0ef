use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::models::{Config, FontProgram, ResolutionScope};
use crate::subset::resolver::resolve_fonts;
use crate::subtitle::{collect_glyph_requirements, extract_used_fonts, write_requirement_blob, SubtitleScript};
use crate::utils::{clear_directory, ensure_directory_exists, log, subset_artifact_name};

/// Directory scoped to one episode's glyph blob and subset artifacts
pub struct EpisodeWorkspace {
    /// Episode identifier, e.g. "01"
    pub episode: String,
    /// The workspace directory, wiped on prepare
    pub dir: PathBuf,
}

impl EpisodeWorkspace {
    /// Create the workspace if needed and wipe it, so nothing from a
    /// previous run survives. The wipe must finish before anything is
    /// written into the workspace in the same run.
    pub fn prepare(episode: &str, config: &Config) -> Result<Self> {
        let dir = config.subset_root.join(format!("E{}", episode));

        ensure_directory_exists(&dir, config)
            .map_err(|e| Error::Workspace(format!("cannot create {}: {}", dir.display(), e)))?;
        clear_directory(&dir, config)
            .map_err(|e| Error::Workspace(format!("cannot clear {}: {}", dir.display(), e)))?;

        Ok(Self {
            episode: episode.to_string(),
            dir,
        })
    }

    /// Where this episode's glyph requirement blob lives
    pub fn requirement_blob_path(&self) -> PathBuf {
        self.dir.join("chars.txt")
    }
}

/// Outcome of one episode's font stage
pub struct EpisodeReport {
    /// Episode identifier
    pub episode: String,
    /// Subset artifacts the external tool was asked to produce
    pub artifacts: Vec<PathBuf>,
    /// How many pool fonts were left out of the workspace
    pub excluded: usize,
    /// Per-font failures, aggregated instead of aborting the batch
    pub failures: Vec<Error>,
}

/// Run the font stage for one episode: wipe the workspace, persist the
/// glyph requirement blob, resolve the pool against the scripts and subset
/// every included font. Per-font tool failures are collected in the report;
/// only workspace and blob errors are fatal for the episode.
pub fn process_episode(
    episode: &str,
    episode_scripts: &[SubtitleScript],
    corpus: &[SubtitleScript],
    pool: &[FontProgram],
    config: &Config,
) -> Result<EpisodeReport> {
    let workspace = EpisodeWorkspace::prepare(episode, config)?;

    let scripts = match config.resolution_scope {
        ResolutionScope::Episode => episode_scripts,
        ResolutionScope::Batch => corpus,
    };

    let chars = collect_glyph_requirements(scripts);
    let blob = workspace.requirement_blob_path();
    write_requirement_blob(&chars, &blob)?;
    log(
        config,
        format!("Episode {}: {} required glyphs", episode, chars.len()),
    );

    let used_fonts = extract_used_fonts(scripts);
    log(
        config,
        format!("Episode {}: scripts use {} font names", episode, used_fonts.len()),
    );

    let partition = resolve_fonts(pool, &used_fonts, config);
    for font in &partition.excluded {
        println!("[SKIP] E{}: unused font {}", episode, font.file_name());
    }

    let (artifacts, failures) = if config.skip_subsetting {
        (Vec::new(), Vec::new())
    } else {
        subset_fonts(&workspace, &blob, &partition.included, config)
    };

    Ok(EpisodeReport {
        episode: episode.to_string(),
        artifacts,
        excluded: partition.excluded.len(),
        failures,
    })
}

/// Invoke the external subsetting tool for every included font. One font's
/// failure is recorded and the batch moves on to its siblings.
pub fn subset_fonts(
    workspace: &EpisodeWorkspace,
    blob: &Path,
    fonts: &[FontProgram],
    config: &Config,
) -> (Vec<PathBuf>, Vec<Error>) {
    let mut artifacts = Vec::new();
    let mut failures = Vec::new();

    for font in fonts {
        let out_path = workspace.dir.join(subset_artifact_name(&font.path));
        println!(
            "[Subset] E{}: {} -> {}",
            workspace.episode,
            font.file_name(),
            out_path.display()
        );

        match run_subset_tool(font, blob, &out_path, config) {
            Ok(()) => artifacts.push(out_path),
            Err(e) => failures.push(e),
        }
    }

    (artifacts, failures)
}

/// One blocking tool invocation. The flags ask the tool to keep all layout
/// features, glyph names, symbol cmaps, original glyph ids and every name
/// record, so the subset stays a drop-in replacement for the source font.
fn run_subset_tool(
    font: &FontProgram,
    blob: &Path,
    out_path: &Path,
    config: &Config,
) -> Result<()> {
    let status = Command::new(&config.subset_tool)
        .arg(&font.path)
        .arg(format!("--output-file={}", out_path.display()))
        .arg(format!("--text-file={}", blob.display()))
        .args([
            "--layout-features=*",
            "--glyph-names",
            "--symbol-cmap",
            "--retain-gids",
            "--name-IDs=*",
            "--name-legacy",
            "--name-languages=*",
        ])
        .status()
        .map_err(|e| Error::Subset {
            font: font.file_name(),
            detail: format!("failed to run {}: {}", config.subset_tool, e),
        })?;

    if !status.success() {
        return Err(Error::Subset {
            font: font.file_name(),
            detail: format!("{} exited with {}", config.subset_tool, status),
        });
    }

    Ok(())
}
