//! Command file parser
//!
//! The grammar is deliberately narrow: a line is either a motion command
//! `G0|G1 X<number> Y<number>`, a `(Cluster <label>)` marker, or something
//! to skip. Reading never fails because of file content; a skipped line is
//! reported with its reason and the read continues.

use crate::error::VisualizerResult;
use edgeplot_core::{MotionCommand, MotionKind, Point};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Why a line did not produce a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Blank or whitespace-only line
    Empty,
    /// Line does not match the command grammar
    Unrecognized,
    /// Coordinate does not fit in the integer coordinate space
    CoordinateOutOfRange(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::Unrecognized => write!(f, "unrecognized line"),
            Self::CoordinateOutOfRange(value) => {
                write!(f, "coordinate out of range: {}", value)
            }
        }
    }
}

/// Outcome of parsing a single line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Command(MotionCommand),
    ClusterMarker(u32),
    Skip(SkipReason),
}

/// A skipped line with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Commands read from a whole file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedProgram {
    pub commands: Vec<MotionCommand>,
    pub markers: Vec<u32>,
    pub skipped: Vec<SkippedLine>,
}

impl ParsedProgram {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of skipped lines, blank lines excluded
    pub fn rejected_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason != SkipReason::Empty)
            .count()
    }
}

fn command_regex() -> &'static Regex {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r"^\s*G([01])\s+X(-?\d+(?:\.\d+)?)\s+Y(-?\d+(?:\.\d+)?)\s*$")
            .expect("invalid regex pattern")
    })
}

fn marker_regex() -> &'static Regex {
    static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKER_REGEX.get_or_init(|| {
        Regex::new(r"^\s*\(Cluster\s+(\d+)\)\s*$").expect("invalid regex pattern")
    })
}

/// Parse one coordinate, rounding decimals to the nearest integer
fn parse_coordinate(text: &str) -> Result<i32, SkipReason> {
    let out_of_range = || SkipReason::CoordinateOutOfRange(text.to_string());

    if !text.contains('.') {
        return text.parse::<i32>().map_err(|_| out_of_range());
    }

    let value: f64 = text.parse().map_err(|_| out_of_range())?;
    let rounded = value.round();
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(out_of_range());
    }
    Ok(rounded as i32)
}

/// Parse a single line of a command file
pub fn parse_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Skip(SkipReason::Empty);
    }

    if let Some(caps) = command_regex().captures(line) {
        let kind = if &caps[1] == "0" {
            MotionKind::Travel
        } else {
            MotionKind::Draw
        };
        let point = parse_coordinate(&caps[2])
            .and_then(|x| parse_coordinate(&caps[3]).map(|y| Point::new(x, y)));
        return match point {
            Ok(point) => ParsedLine::Command(MotionCommand::new(kind, point)),
            Err(reason) => ParsedLine::Skip(reason),
        };
    }

    if let Some(caps) = marker_regex().captures(line) {
        return match caps[1].parse::<u32>() {
            Ok(label) => ParsedLine::ClusterMarker(label),
            Err(_) => ParsedLine::Skip(SkipReason::Unrecognized),
        };
    }

    ParsedLine::Skip(SkipReason::Unrecognized)
}

/// Parse a whole command file held in memory
pub fn parse_str(content: &str) -> ParsedProgram {
    let mut program = ParsedProgram::default();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        match parse_line(line) {
            ParsedLine::Command(command) => {
                trace!("Line {}: {}", line_number, command);
                program.commands.push(command);
            }
            ParsedLine::ClusterMarker(label) => program.markers.push(label),
            ParsedLine::Skip(reason) => {
                if reason != SkipReason::Empty {
                    debug!("Skipping line {} ({}): {:?}", line_number, reason, line);
                }
                program.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }

    debug!(
        "Parsed {} commands, {} markers, {} skipped lines",
        program.commands.len(),
        program.markers.len(),
        program.skipped.len()
    );
    program
}

/// Reads command files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> ParsedProgram {
        parse_str(content)
    }

    /// Read and parse a command file
    pub fn read_file(&self, path: impl AsRef<Path>) -> VisualizerResult<ParsedProgram> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(parse_str(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_and_draw() {
        assert_eq!(
            parse_line("G0 X12 Y7"),
            ParsedLine::Command(MotionCommand::Travel(Point::new(12, 7)))
        );
        assert_eq!(
            parse_line("  G1   X-3 Y0  "),
            ParsedLine::Command(MotionCommand::Draw(Point::new(-3, 0)))
        );
    }

    #[test]
    fn test_decimal_coordinates_are_rounded() {
        assert_eq!(
            parse_line("G1 X1.6 Y-2.4"),
            ParsedLine::Command(MotionCommand::Draw(Point::new(2, -2)))
        );
        assert_eq!(
            parse_line("G0 X0.5 Y10.0"),
            ParsedLine::Command(MotionCommand::Travel(Point::new(1, 10)))
        );
    }

    #[test]
    fn test_cluster_marker() {
        assert_eq!(parse_line("(Cluster 4)"), ParsedLine::ClusterMarker(4));
        assert_eq!(parse_line("  (Cluster   12)  "), ParsedLine::ClusterMarker(12));
    }

    #[test]
    fn test_skip_reasons() {
        assert_eq!(parse_line(""), ParsedLine::Skip(SkipReason::Empty));
        assert_eq!(parse_line("   \t"), ParsedLine::Skip(SkipReason::Empty));
        for line in [
            "G2 X1 Y1",
            "G1 Y1 X1",
            "G1 X1",
            "G01 X1 Y1",
            "G1X1 Y1",
            "G1 X1 Y1 Z3",
            "G1 Xa Y1",
            "; comment",
            "(Cluster -1)",
            "M3",
        ] {
            assert_eq!(
                parse_line(line),
                ParsedLine::Skip(SkipReason::Unrecognized),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_coordinate_out_of_range() {
        assert_eq!(
            parse_line("G1 X99999999999 Y0"),
            ParsedLine::Skip(SkipReason::CoordinateOutOfRange("99999999999".to_string()))
        );
        assert!(matches!(
            parse_line("G0 X0 Y-3000000000.5"),
            ParsedLine::Skip(SkipReason::CoordinateOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_str_collects_everything() {
        let program = parse_str("(Cluster 0)\nG0 X0 Y0\n\nG1 X1 Y1\nhello\n(Cluster 1)\nG0 X5 Y5\n");
        assert_eq!(
            program.commands,
            vec![
                MotionCommand::Travel(Point::new(0, 0)),
                MotionCommand::Draw(Point::new(1, 1)),
                MotionCommand::Travel(Point::new(5, 5)),
            ]
        );
        assert_eq!(program.markers, vec![0, 1]);
        assert_eq!(program.skipped.len(), 2);
        assert_eq!(program.skipped[0].line_number, 3);
        assert_eq!(
            program.skipped[1],
            SkippedLine {
                line_number: 5,
                reason: SkipReason::Unrecognized
            }
        );
        assert_eq!(program.rejected_count(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let program = parse_str("G0 X1 Y2\r\nG1 X3 Y4\r\n");
        assert_eq!(program.commands.len(), 2);
        assert!(program.skipped.is_empty());
    }
}
