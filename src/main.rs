use std::env;
use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

mod error;
mod font;
mod models;
mod subset;
mod subtitle;
mod utils;

use crate::error::Error;
use crate::font::{scan_font_pool, split_collection};
use crate::models::{Config, ResolutionScope};
use crate::subset::{process_episode, EpisodeReport};
use crate::subtitle::{group_by_episode, scan_scripts};
use crate::utils::{ensure_directory_exists, log, sorted_files_with_extensions};

fn main() -> Result<(), Box<dyn StdError>> {
    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        println!("{}", get_help_message());
        return Ok(());
    }

    let mut config = Config::new(
        &get_project_dir(&args),
        args.contains(&"--debug".to_string()),
    );
    if args.contains(&"--batch-scope".to_string()) {
        config.resolution_scope = ResolutionScope::Batch;
    }
    if args.contains(&"--no-font-subset".to_string()) {
        config.skip_subsetting = true;
    }
    if let Some(pos) = args.iter().position(|arg| arg == "--subset-tool") {
        match args.get(pos + 1) {
            Some(tool) => config.subset_tool = tool.clone(),
            None => {
                println!("Error: --subset-tool option requires a command name");
                return Err(Box::new(Error::Config(
                    "--subset-tool option requires a command name".to_string(),
                )));
            }
        }
    }

    if config.debug_mode {
        println!("Debug mode enabled");
        println!("Resolution scope: {}", config.resolution_scope);
    }

    if !config.subtitle_dir.is_dir() {
        println!(
            "Error: subtitle directory '{}' not found",
            config.subtitle_dir.display()
        );
        return Err(Box::new(Error::InvalidPath(config.subtitle_dir)));
    }
    if !config.fonts_dir.is_dir() {
        println!(
            "Error: font directory '{}' not found",
            config.fonts_dir.display()
        );
        return Err(Box::new(Error::InvalidPath(config.fonts_dir)));
    }
    ensure_directory_exists(&config.subset_root, &config)?;

    // Split collections in place first so the pool scan sees only
    // standalone programs
    println!("=== Scanning font pool ===");
    for container in sorted_files_with_extensions(&config.fonts_dir, &["ttc", "otc"])? {
        match split_collection(&container, &config.fonts_dir, &config) {
            Ok(written) => log(
                &config,
                format!("{}: {} fonts split", container.display(), written.len()),
            ),
            Err(e) => println!("[ERROR] Cannot split {}: {}", container.display(), e),
        }
    }

    let pool = scan_font_pool(&config.fonts_dir, &config)?;
    println!("[INFO] Found {} fonts in pool", pool.len());

    let corpus = scan_scripts(&config.subtitle_dir, &config)?;
    if corpus.is_empty() {
        println!(
            "Error: no subtitle scripts in '{}'",
            config.subtitle_dir.display()
        );
        return Err(Box::new(Error::Subtitle(
            "no subtitle scripts found".to_string(),
        )));
    }

    let episodes: Vec<_> = group_by_episode(corpus.clone()).into_iter().collect();
    println!(
        "[INFO] {} scripts across {} episodes",
        corpus.len(),
        episodes.len()
    );

    // Episodes own disjoint workspaces, so they can run in parallel over
    // the shared read-only pool
    let results: Vec<(String, crate::error::Result<EpisodeReport>)> = episodes
        .par_iter()
        .map(|(episode, scripts)| {
            (
                episode.clone(),
                process_episode(episode, scripts, &corpus, &pool, &config),
            )
        })
        .collect();

    let mut artifact_count = 0;
    let mut failure_count = 0;
    for (episode, result) in &results {
        match result {
            Ok(report) => {
                println!(
                    "[DONE] E{}: {} subset artifacts, {} fonts excluded",
                    report.episode,
                    report.artifacts.len(),
                    report.excluded
                );
                artifact_count += report.artifacts.len();
                for failure in &report.failures {
                    println!("[ERROR] E{}: {}", episode, failure);
                    failure_count += 1;
                }
            }
            Err(e) => {
                println!("[ERROR] E{}: {}", episode, e);
                failure_count += 1;
            }
        }
    }

    println!("Subsetting summary:");
    println!("  - {} episodes processed", results.len());
    println!("  - {} subset artifacts", artifact_count);
    println!("  - {} failures", failure_count);

    Ok(())
}

/// First non-flag argument that names a directory, else the current directory
fn get_project_dir(args: &[String]) -> PathBuf {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--subset-tool" {
            skip_next = true;
            continue;
        }
        if !arg.starts_with("--") {
            let path = Path::new(arg);
            if path.is_dir() {
                return path.to_path_buf();
            }
        }
    }
    PathBuf::from(".")
}

fn get_help_message() -> String {
    r#"Font Subsetter - subtitle font subsetting and bundling

USAGE:
    FontSub [OPTIONS] [PROJECT_DIR]

ARGS:
    <PROJECT_DIR>    Project directory containing ass/, fonts/ and fonts_sub/
                     (defaults to the current directory)

OPTIONS:
    -h, --help            Show this help message
    --debug               Enable debug output
    --batch-scope         Resolve every episode against the whole subtitle
                          corpus instead of its own scripts only
    --no-font-subset      Split containers and report resolution, but skip
                          the external subsetting tool
    --subset-tool <CMD>   Subsetting tool to invoke (default: pyftsubset)

Font collections (.ttc/.otc) found in fonts/ are split into standalone font
programs before resolution. Each episode gets its own fonts_sub/E<nn>/
workspace holding the glyph requirement blob and the subset fonts; files
whose name contains "subset" are the ones the muxer attaches.
"#
    .to_string()
}
