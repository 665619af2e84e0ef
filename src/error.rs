use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the FontSub application
#[derive(Debug)]
pub enum Error {
    /// IO operations errors
    Io(io::Error),
    /// Font parsing or serialization errors
    Font(String),
    /// Subtitle script reading or decoding errors
    Subtitle(String),
    /// Episode workspace creation or clearing errors
    Workspace(String),
    /// External subsetting tool failure for one font
    Subset {
        /// File name of the font being subset
        font: String,
        /// What went wrong when running the tool
        detail: String,
    },
    /// Invalid file or directory path
    InvalidPath(PathBuf),
    /// Configuration errors
    Config(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Font(msg) => write!(f, "Font error: {}", msg),
            Error::Subtitle(msg) => write!(f, "Subtitle error: {}", msg),
            Error::Workspace(msg) => write!(f, "Workspace error: {}", msg),
            Error::Subset { font, detail } => write!(f, "Subset error for {}: {}", font, detail),
            Error::InvalidPath(path) => write!(f, "Invalid path: {}", path.display()),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type alias for FontSub operations
pub type Result<T> = std::result::Result<T, Error>;
