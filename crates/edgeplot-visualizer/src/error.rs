//! Error types for the visualizer crate.
//!
//! Malformed command lines are not errors: the parser skips them. Only
//! file system failures surface here.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing toolpath files.
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The file could not be moved into place after writing.
    #[error("Failed to persist {path}: {source}")]
    PersistError {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for visualizer operations.
pub type VisualizerResult<T> = Result<T, VisualizerError>;
