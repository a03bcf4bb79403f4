//! Data models for edge points and their stroke assignment
//!
//! This module provides:
//! - Integer image-space points
//! - Point sets in extractor (row-major scan) order
//! - Cluster labels with a distinguished noise marker
//! - Clusters derived by filtering a point set against its labels

mod labels;

pub use labels::{Cluster, ClusterLabel, ClusterLabels};

use crate::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in image space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// First coordinate (pixel row by default)
    pub x: i32,
    /// Second coordinate (pixel column by default)
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from unsigned pixel coordinates
    pub fn from_pixel(x: u32, y: u32) -> DataResult<Self> {
        let overflow = || DataError::CoordinateOverflow { x, y };
        Ok(Self {
            x: i32::try_from(x).map_err(|_| overflow())?,
            y: i32::try_from(y).map_err(|_| overflow())?,
        })
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Coordinates as a float pair, for spatial indexes and centroid math
    pub fn to_f64(self) -> [f64; 2] {
        [f64::from(self.x), f64::from(self.y)]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Ordered sequence of edge points as produced by the extractor.
///
/// Insertion order is the row-major scan order of the source image. It is
/// not spatially meaningful, but it is the reference draw order for paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Create an empty point set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a point set with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point at the end of the scan order
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Whether `point` occurs anywhere in the set
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty set
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
