//! Command line interface
//!
//! Flags override values loaded from the configuration file. The merged
//! configuration is validated once, when the pipeline is built.

use anyhow::Context;
use clap::Parser;
use edgeplot_settings::{AxisOrder, ClusterStrategy, Config, PathOrdering};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "edgeplot", version)]
#[command(
    about = "Turn an edge-detected image into pen-plotter travel and draw commands",
    long_about = None
)]
pub struct Args {
    /// Input image, or a directory of images for batch mode.
    /// With --replay, a command file to read back.
    pub input: PathBuf,

    /// Output command file, or a directory in batch mode.
    /// With --replay, the SVG preview to write.
    pub output: PathBuf,

    /// Configuration file (.toml or .json); defaults to the user config file if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Clustering strategy: density or partition
    #[arg(short, long)]
    pub strategy: Option<ClusterStrategy>,

    /// Density neighbourhood radius in pixels
    #[arg(long)]
    pub eps: Option<f64>,

    /// Neighbourhood size (point included) that makes a core point
    #[arg(long)]
    pub min_samples: Option<usize>,

    /// Number of partition clusters
    #[arg(short)]
    pub k: Option<usize>,

    /// Seed for partition centroid initialisation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Upper bound on partition refinement iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Point ordering inside a cluster: input or nearest
    #[arg(long)]
    pub ordering: Option<PathOrdering>,

    /// Skip Canny edge detection (the input already is an edge map)
    #[arg(long)]
    pub no_edge_detect: bool,

    /// Canny lower hysteresis threshold
    #[arg(long)]
    pub canny_low: Option<f32>,

    /// Canny upper hysteresis threshold
    #[arg(long)]
    pub canny_high: Option<f32>,

    /// Luma value a pixel must exceed to be an edge point
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Treat dark pixels as edge points
    #[arg(long)]
    pub invert: bool,

    /// Mirror Y (with the default axis order, column 0 becomes the largest Y)
    #[arg(long)]
    pub flip_y: bool,

    /// Pixel axis mapped to X: row-column (X = row) or column-row (X = column)
    #[arg(long)]
    pub axis_order: Option<AxisOrder>,

    /// Do not write (Cluster n) marker lines
    #[arg(long)]
    pub no_markers: bool,

    /// Write an SVG preview (a directory in batch mode)
    #[arg(short, long)]
    pub preview: Option<PathBuf>,

    /// Include travel moves in SVG previews
    #[arg(long)]
    pub preview_travel: bool,

    /// Read INPUT as a command file and render it to the SVG at OUTPUT
    #[arg(long)]
    pub replay: bool,

    /// Write a JSON report of the run
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Load the configuration file and apply flag overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_or_default().context("failed to load user config")?,
        };
        self.apply(&mut config);
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Override `config` with every flag that was given
    pub fn apply(&self, config: &mut Config) {
        let c = &mut config.clustering;
        if let Some(strategy) = self.strategy {
            c.strategy = strategy;
        }
        if let Some(eps) = self.eps {
            c.eps = eps;
        }
        if let Some(min_samples) = self.min_samples {
            c.min_samples = min_samples;
        }
        if let Some(k) = self.k {
            c.k = k;
        }
        if let Some(seed) = self.seed {
            c.seed = seed;
        }
        if let Some(max_iterations) = self.max_iterations {
            c.max_iterations = max_iterations;
        }
        if let Some(ordering) = self.ordering {
            c.ordering = ordering;
        }

        let e = &mut config.extraction;
        if self.no_edge_detect {
            e.edge_detect = false;
        }
        if let Some(low) = self.canny_low {
            e.canny_low = low;
        }
        if let Some(high) = self.canny_high {
            e.canny_high = high;
        }
        if let Some(axis_order) = self.axis_order {
            e.axis_order = axis_order;
        }
        if let Some(threshold) = self.threshold {
            e.threshold = threshold;
        }
        e.invert |= self.invert;
        e.flip_y |= self.flip_y;

        if self.no_markers {
            config.output.cluster_markers = false;
        }
        config.output.preview_travel |= self.preview_travel;
    }
}
