use super::{PenState, PlotterSink};
use edgeplot_core::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals gathered while playing a toolpath
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStats {
    pub travel_moves: usize,
    pub draw_moves: usize,
    /// Distance covered with the pen up, in pixels
    pub travel_distance: f64,
    /// Distance covered with the pen down, in pixels
    pub draw_distance: f64,
    pub pen_lifts: usize,
    pub pen_drops: usize,
}

impl PlaybackStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_count(&self) -> usize {
        self.travel_moves + self.draw_moves
    }

    /// Share of the total distance spent drawing, 0 when nothing moved
    pub fn draw_ratio(&self) -> f64 {
        let total = self.travel_distance + self.draw_distance;
        if total > 0.0 {
            self.draw_distance / total
        } else {
            0.0
        }
    }
}

impl PlotterSink for PlaybackStats {
    fn pen_up(&mut self) {
        self.pen_lifts += 1;
    }

    fn pen_down(&mut self) {
        self.pen_drops += 1;
    }

    fn move_to(&mut self, from: Option<Point>, to: Point, pen: PenState) {
        let distance = from.map_or(0.0, |f| f.distance_to(&to));
        match pen {
            PenState::Up => {
                self.travel_moves += 1;
                self.travel_distance += distance;
            }
            PenState::Down => {
                self.draw_moves += 1;
                self.draw_distance += distance;
            }
        }
    }
}

impl fmt::Display for PlaybackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} draws ({:.1} px), {} travels ({:.1} px), {} pen lifts, {} pen drops",
            self.draw_moves,
            self.draw_distance,
            self.travel_moves,
            self.travel_distance,
            self.pen_lifts,
            self.pen_drops
        )
    }
}
