use std::path::Path;

use thiserror::Error;

/// Error types for the nowplaying application.
///
/// Covers configuration loading, parsing and file system failures. Playback
/// failures live in [`EngineError`](crate::services::playback::EngineError)
/// and never surface through this type.
#[derive(Error, Debug)]
pub enum NowPlayingError {
    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// TOML serialization error
    #[error("failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// A specialized `Result` type for nowplaying operations.
pub type Result<T> = std::result::Result<T, NowPlayingError>;

impl NowPlayingError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        NowPlayingError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io_at(error: impl std::fmt::Display, path: &Path) -> Self {
        NowPlayingError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
