pub mod file;
pub mod logging;
pub mod naming;

pub use file::{clear_directory, ensure_directory_exists, sorted_files_with_extensions};
pub use logging::log;
pub use naming::{episode_number, sanitize_name, subset_artifact_name, SUBSET_MARKER};
