//! SVG preview of a played toolpath.
//!
//! Draw moves become one `<path>` of `M`/`L` segments; travel moves are
//! optionally rendered as a second, dashed path.

use super::{PenState, PlotterSink};
use crate::error::VisualizerResult;
use crate::gcode::write_atomic;
use edgeplot_core::Point;
use std::path::Path;
use tracing::debug;

const MARGIN: i64 = 2;

#[derive(Debug, Clone, Default)]
pub struct SvgPreview {
    show_travel: bool,
    y_up: bool,
    draw_path: String,
    travel_path: String,
    last_draw: Option<Point>,
    bounds: Option<(Point, Point)>,
    segments: usize,
}

impl SvgPreview {
    pub fn new(show_travel: bool) -> Self {
        Self {
            show_travel,
            ..Default::default()
        }
    }

    /// Treat coordinates as device space with Y growing upward
    pub fn with_y_up(mut self, y_up: bool) -> Self {
        self.y_up = y_up;
        self
    }

    /// Path data of all draw moves
    pub fn draw_path(&self) -> &str {
        self.draw_path.trim_end()
    }

    /// Path data of all travel moves, empty unless travel is shown
    pub fn travel_path(&self) -> &str {
        self.travel_path.trim_end()
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    fn y(&self, p: Point) -> i64 {
        if self.y_up {
            -i64::from(p.y)
        } else {
            i64::from(p.y)
        }
    }

    fn include(&mut self, p: Point) {
        self.bounds = Some(match self.bounds {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    /// `min_x min_y width height`, in SVG user units
    fn view_box(&self) -> (i64, i64, i64, i64) {
        let Some((min, max)) = self.bounds else {
            return (0, 0, 1, 1);
        };
        let (top, bottom) = if self.y_up {
            (-i64::from(max.y), -i64::from(min.y))
        } else {
            (i64::from(min.y), i64::from(max.y))
        };
        let left = i64::from(min.x);
        let right = i64::from(max.x);
        (
            left - MARGIN,
            top - MARGIN,
            right - left + 2 * MARGIN,
            bottom - top + 2 * MARGIN,
        )
    }

    /// Standalone SVG document
    pub fn to_svg(&self) -> String {
        let (x, y, width, height) = self.view_box();
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{x} {y} {width} {height}\" width=\"{width}\" height=\"{height}\">\n"
        ));
        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"white\"/>\n"
        ));
        if self.show_travel && !self.travel_path.is_empty() {
            svg.push_str(&format!(
                r##"  <path d="{}" fill="none" stroke="#d33" stroke-width="0.5" stroke-dasharray="2 2"/>"##,
                self.travel_path()
            ));
            svg.push('\n');
        }
        if !self.draw_path.is_empty() {
            svg.push_str(&format!(
                r#"  <path d="{}" fill="none" stroke="black" stroke-width="1" stroke-linecap="round" stroke-linejoin="round"/>"#,
                self.draw_path()
            ));
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG document atomically
    pub fn write_file(&self, path: impl AsRef<Path>) -> VisualizerResult<()> {
        let path = path.as_ref();
        let svg = self.to_svg();
        write_atomic(path, svg.as_bytes())?;
        debug!(
            "Wrote SVG preview with {} draw segments to {}",
            self.segments,
            path.display()
        );
        Ok(())
    }
}

impl PlotterSink for SvgPreview {
    fn move_to(&mut self, from: Option<Point>, to: Point, pen: PenState) {
        self.include(to);
        let Some(from) = from else {
            return;
        };

        match pen {
            PenState::Up => {
                if self.show_travel {
                    let (fy, ty) = (self.y(from), self.y(to));
                    self.travel_path
                        .push_str(&format!("M {} {} L {} {} ", from.x, fy, to.x, ty));
                }
                self.last_draw = None;
            }
            PenState::Down => {
                if self.last_draw != Some(from) {
                    let fy = self.y(from);
                    self.draw_path.push_str(&format!("M {} {} ", from.x, fy));
                }
                let ty = self.y(to);
                self.draw_path.push_str(&format!("L {} {} ", to.x, ty));
                self.last_draw = Some(to);
                self.segments += 1;
            }
        }
    }
}
