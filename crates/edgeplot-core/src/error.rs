//! Error types for the core data model.
//!
//! Most of the pipeline is infallible: an empty point set is a valid input.
//! The errors here cover the few ways the data model itself can be misused.

use thiserror::Error;

/// Errors raised while building or combining core data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A label mapping was applied to a point set of a different length.
    #[error("Label count mismatch: {points} points but {labels} labels")]
    LabelCountMismatch {
        /// Number of points in the point set.
        points: usize,
        /// Number of labels in the mapping.
        labels: usize,
    },

    /// A pixel coordinate does not fit the signed point representation.
    #[error("Pixel coordinate ({x}, {y}) exceeds the supported range")]
    CoordinateOverflow {
        /// Horizontal coordinate.
        x: u32,
        /// Vertical coordinate.
        y: u32,
    },
}

/// Result type alias for core data operations.
pub type DataResult<T> = Result<T, DataError>;
