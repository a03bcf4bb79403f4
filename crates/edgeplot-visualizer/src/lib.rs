//! # EdgePlot Visualizer
//!
//! Everything that happens to a toolpath after it has been synthesized:
//! writing it as a command file, reading command files back, playing the
//! commands against a plotter sink and rendering SVG previews.

pub mod error;
pub mod gcode;
pub mod player;

pub use error::{VisualizerError, VisualizerResult};
pub use gcode::{
    parse_line, parse_str, write_atomic, CommandParser, CommandWriter, ParsedLine,
    ParsedProgram, SkipReason, SkippedLine,
};
pub use player::{PenState, PlaybackStats, PlayerState, PlotterSink, SvgPreview, ToolpathPlayer};
