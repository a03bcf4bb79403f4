//! Toolpath playback
//!
//! [`ToolpathPlayer`] consumes motion commands strictly in order and drives a
//! [`PlotterSink`]. The pen position and pen state live in the player and are
//! updated by every command; sinks only see the resulting pen transitions and
//! moves.

mod stats;
mod svg;

pub use stats::PlaybackStats;
pub use svg::SvgPreview;

use edgeplot_core::{MotionCommand, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Pen position relative to the paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenState {
    #[default]
    Up,
    Down,
}

/// Position and pen state of the plotter head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// `None` until the first command has been played
    pub position: Option<Point>,
    pub pen: PenState,
}

/// Receives the motion produced by playing a toolpath.
///
/// `move_to` is called once per command. `from` is `None` for the very first
/// move, when the head position is still unknown; a sink must not draw a line
/// in that case.
pub trait PlotterSink {
    fn pen_up(&mut self) {}

    fn pen_down(&mut self) {}

    fn move_to(&mut self, from: Option<Point>, to: Point, pen: PenState);
}

impl<S: PlotterSink + ?Sized> PlotterSink for &mut S {
    fn pen_up(&mut self) {
        (**self).pen_up()
    }

    fn pen_down(&mut self) {
        (**self).pen_down()
    }

    fn move_to(&mut self, from: Option<Point>, to: Point, pen: PenState) {
        (**self).move_to(from, to, pen)
    }
}

/// Feeds the same motion to two sinks
impl<A: PlotterSink, B: PlotterSink> PlotterSink for (A, B) {
    fn pen_up(&mut self) {
        self.0.pen_up();
        self.1.pen_up();
    }

    fn pen_down(&mut self) {
        self.0.pen_down();
        self.1.pen_down();
    }

    fn move_to(&mut self, from: Option<Point>, to: Point, pen: PenState) {
        self.0.move_to(from, to, pen);
        self.1.move_to(from, to, pen);
    }
}

/// Plays motion commands against a sink
#[derive(Debug)]
pub struct ToolpathPlayer<S> {
    state: PlayerState,
    sink: S,
}

impl<S: PlotterSink> ToolpathPlayer<S> {
    /// Start with the pen up at an unknown position
    pub fn new(sink: S) -> Self {
        Self {
            state: PlayerState::default(),
            sink,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Play a single command
    pub fn step(&mut self, command: &MotionCommand) {
        let (pen, target) = match *command {
            MotionCommand::Travel(p) => (PenState::Up, p),
            MotionCommand::Draw(p) => (PenState::Down, p),
        };

        if pen != self.state.pen {
            match pen {
                PenState::Up => self.sink.pen_up(),
                PenState::Down => self.sink.pen_down(),
            }
            self.state.pen = pen;
        }

        trace!("{:?} -> {} ({:?})", self.state.position, target, pen);
        self.sink.move_to(self.state.position, target, pen);
        self.state.position = Some(target);
    }

    /// Play every command in order
    pub fn play<'a, I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = &'a MotionCommand>,
    {
        let mut count = 0usize;
        for command in commands {
            self.step(command);
            count += 1;
        }
        debug!(
            "Played {} commands, pen {:?} at {:?}",
            count, self.state.pen, self.state.position
        );
    }
}
