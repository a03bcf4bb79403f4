//! Error types for the toolpath synthesis crate.
//!
//! This module provides structured error types for parameter validation,
//! image loading and toolpath synthesis.

use edgeplot_core::DataError;
use std::io;
use thiserror::Error;

/// Errors that can occur during toolpath synthesis.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The source image could not be opened or decoded.
    #[error("Image processing error: {0}")]
    ImageError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The core data model rejected an operation.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl From<image::ImageError> for CamToolError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::IoError(io),
            other => Self::ImageError(other.to_string()),
        }
    }
}

/// Errors related to synthesis parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ParameterError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for synthesis operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
