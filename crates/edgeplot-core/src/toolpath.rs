//! Draw paths and the motion commands emitted for them.

use crate::data::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered points of one cluster in draw order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Where the pen goes down
    pub fn start(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Sum of the straight segments between consecutive points
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Kind of a motion command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Pen-up move (G0)
    Travel,
    /// Pen-down move (G1)
    Draw,
}

impl MotionKind {
    /// G-code word written for this kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::Travel => "G0",
            Self::Draw => "G1",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single plotter move
///
/// Displays as one line of the command file format, e.g. `G0 X12 Y7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionCommand {
    /// Move without marking
    Travel(Point),
    /// Move while marking
    Draw(Point),
}

impl MotionCommand {
    pub fn new(kind: MotionKind, point: Point) -> Self {
        match kind {
            MotionKind::Travel => Self::Travel(point),
            MotionKind::Draw => Self::Draw(point),
        }
    }

    pub fn kind(&self) -> MotionKind {
        match self {
            Self::Travel(_) => MotionKind::Travel,
            Self::Draw(_) => MotionKind::Draw,
        }
    }

    /// Target position of the move
    pub fn point(&self) -> Point {
        match self {
            Self::Travel(p) | Self::Draw(p) => *p,
        }
    }

    pub fn is_travel(&self) -> bool {
        matches!(self, Self::Travel(_))
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw(_))
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.point();
        write!(f, "{} X{} Y{}", self.kind().code(), p.x, p.y)
    }
}

/// The commands emitted for one cluster
///
/// Always starts with a single travel followed only by draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub label: u32,
    pub commands: Vec<MotionCommand>,
}

impl Stroke {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of pen-down moves in this stroke
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }
}
