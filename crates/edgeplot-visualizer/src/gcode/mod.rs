//! Command file format
//!
//! One command per line: `G0 X<int> Y<int>` for travel, `G1 X<int> Y<int>`
//! for draw. A `(Cluster <label>)` line may precede each cluster. Readers
//! skip any line that is neither.
//!
//! This module provides:
//! - A strict line parser returning a typed command, a marker or a skip reason
//! - A writer that renders strokes and writes files atomically

pub mod parser;
pub mod writer;

pub use parser::{parse_line, parse_str, CommandParser, ParsedLine, ParsedProgram, SkipReason, SkippedLine};
pub use writer::{write_atomic, CommandWriter};
