//! Engine error types.
//!
//! The format parsers themselves never fail: data-quality problems
//! surface as warnings on their parse results. Errors are reserved for
//! the genuinely fallible edges, reading files and dispatching content
//! nobody recognizes.

use std::path::PathBuf;

/// Errors from the editorial engine's fallible entry points.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Failed to read an input file.
    #[error("Failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content matched none of the supported editorial formats.
    #[error("Unrecognized editorial format")]
    UnknownFormat,
}

impl EngineError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}
