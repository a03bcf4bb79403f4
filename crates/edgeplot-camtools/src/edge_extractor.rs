//! Edge Point Extraction
//!
//! Turns an image into the ordered point set the rest of the pipeline
//! consumes. The image is reduced to 8-bit luma, run through Canny edge
//! detection (unless the input already is an edge map) and every pixel
//! brighter than the threshold becomes a point. Pixels are visited row by
//! row, so the resulting order is the row-major scan order of the image.
//!
//! By default a point is `(row, column)`: X follows the image rows and Y the
//! columns. [`AxisOrder::ColumnRow`] gives the screen convention instead.

use crate::error::CamToolResult;
use edgeplot_core::{Point, PointSet};
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Lowest usable Canny hysteresis threshold
pub const MIN_CANNY_THRESHOLD: f32 = 1.0;

/// Mapping from pixel position to point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// x = row, y = column
    #[default]
    RowColumn,
    /// x = column, y = row
    ColumnRow,
}

/// Edge point extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionParameters {
    /// Run Canny edge detection before thresholding
    pub edge_detect: bool,
    /// Canny lower hysteresis threshold
    pub canny_low: f32,
    /// Canny upper hysteresis threshold
    pub canny_high: f32,
    /// Luma value a pixel must exceed to count as foreground (0-255)
    pub threshold: u8,
    /// Treat pixels at or below the threshold as foreground instead
    pub invert: bool,
    /// Mirror the Y coordinate (`extent - 1 - y`)
    pub flip_y: bool,
    pub axis_order: AxisOrder,
}

impl Default for ExtractionParameters {
    fn default() -> Self {
        Self {
            edge_detect: true,
            canny_low: 100.0,
            canny_high: 200.0,
            threshold: 128,
            invert: false,
            flip_y: false,
            axis_order: AxisOrder::RowColumn,
        }
    }
}

/// Extracts foreground pixel coordinates from images
#[derive(Debug, Clone, Default)]
pub struct EdgePointExtractor {
    params: ExtractionParameters,
}

impl EdgePointExtractor {
    pub fn new(params: ExtractionParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExtractionParameters {
        &self.params
    }

    /// Load an image file and extract its foreground points
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> CamToolResult<PointSet> {
        let path = path.as_ref();
        let img = image::open(path)?;
        debug!(
            "Loaded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        self.extract(&img)
    }

    /// Extract foreground points from a decoded image
    pub fn extract(&self, img: &DynamicImage) -> CamToolResult<PointSet> {
        let gray = img.to_luma8();
        if self.params.edge_detect {
            self.extract_luma(&self.detect_edges(&gray))
        } else {
            self.extract_luma(&gray)
        }
    }

    /// Canny edge map of `gray`; edge pixels are 255, everything else 0
    pub fn detect_edges(&self, gray: &GrayImage) -> GrayImage {
        let low = self.params.canny_low.max(MIN_CANNY_THRESHOLD);
        let high = self.params.canny_high.max(low);
        let edges = imageproc::edges::canny(gray, low, high);
        debug!(
            "Canny ({}/{}) on {}x{} image",
            low,
            high,
            gray.width(),
            gray.height()
        );
        edges
    }

    /// Extract foreground points from a grayscale edge map
    pub fn extract_luma(&self, gray: &GrayImage) -> CamToolResult<PointSet> {
        let (width, height) = gray.dimensions();
        let y_extent = match self.params.axis_order {
            AxisOrder::RowColumn => width,
            AxisOrder::ColumnRow => height,
        };
        let mut points = PointSet::new();

        for row in 0..height {
            for column in 0..width {
                if !self.is_foreground(gray.get_pixel(column, row).0[0]) {
                    continue;
                }
                let (x, y) = match self.params.axis_order {
                    AxisOrder::RowColumn => (row, column),
                    AxisOrder::ColumnRow => (column, row),
                };
                let y = if self.params.flip_y {
                    y_extent - 1 - y
                } else {
                    y
                };
                points.push(Point::from_pixel(x, y)?);
            }
        }

        debug!(
            "Extracted {} foreground points from {}x{} image",
            points.len(),
            width,
            height
        );
        Ok(points)
    }

    fn is_foreground(&self, luma: u8) -> bool {
        (luma > self.params.threshold) != self.params.invert
    }
}
