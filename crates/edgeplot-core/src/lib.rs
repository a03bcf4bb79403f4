//! # EdgePlot Core
//!
//! Core types shared by every EdgePlot crate.
//! Provides the data model that flows through the toolpath pipeline:
//!
//! 1. [`Point`] / [`PointSet`] - foreground pixel coordinates in scan order
//! 2. [`ClusterLabel`] / [`ClusterLabels`] - stroke assignment per point
//! 3. [`Cluster`] / [`Path`] - the points of one stroke and their draw order
//! 4. [`MotionCommand`] / [`Stroke`] - pen-up travel and pen-down draw moves

pub mod data;
pub mod error;
pub mod toolpath;

pub use data::{Cluster, ClusterLabel, ClusterLabels, Point, PointSet};
pub use error::{DataError, DataResult};
pub use toolpath::{MotionCommand, MotionKind, Path, Stroke};
