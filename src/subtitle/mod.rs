//! Subtitle script reading and requirement extraction

pub mod chars;
pub mod script;
pub mod styles;

pub use chars::{collect_glyph_requirements, write_requirement_blob};
pub use script::{group_by_episode, load_script, scan_scripts, SubtitleScript};
pub use styles::extract_used_fonts;
