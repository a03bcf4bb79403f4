//! # EdgePlot
//!
//! Turns edge-detected raster images into pen-plotter toolpaths:
//! - Canny edge pixels become points (row-major scan, x = row, y = column)
//! - Points are grouped into strokes by density or partition clustering
//! - Each stroke becomes one travel move followed by draw moves
//! - Command files can be replayed into statistics and SVG previews
//!
//! ## Architecture
//!
//! EdgePlot is organized as a workspace with multiple crates:
//!
//! 1. **edgeplot-core** - Points, labels, paths and motion commands
//! 2. **edgeplot-settings** - Run configuration, validation, JSON/TOML files
//! 3. **edgeplot-camtools** - Extraction, clustering, ordering, emission
//! 4. **edgeplot-visualizer** - Command file I/O, playback, SVG preview
//! 5. **edgeplot** - CLI binary, single-image pipeline and batch runner

pub mod batch;
pub mod cli;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

pub use edgeplot_camtools::{
    ClusteringParameters, DensityParameters, ExtractionParameters, PartitionParameters,
    PathOrderer, SynthesisParameters, Toolpath, ToolpathSynthesizer,
};
pub use edgeplot_core::{MotionCommand, Point, PointSet, Stroke};
pub use edgeplot_settings::{AxisOrder, ClusterStrategy, Config, PathOrdering};
pub use edgeplot_visualizer::{CommandWriter, PlaybackStats, SvgPreview, ToolpathPlayer};

pub use batch::{collect_images, run_batch, BatchOutcome, BatchSummary, OutcomeResult};
pub use pipeline::{replay, ImageJob, ImageReport, Pipeline, ReplayReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout free
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = log_filter(rust_log.as_deref(), verbose);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Filter from a `RUST_LOG` value, or the verbosity level when it is unset
/// or unparsable. A valid `RUST_LOG` wins over `verbose` entirely.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

/// Clustering and ordering parameters of a configuration
pub fn synthesis_parameters(config: &Config) -> SynthesisParameters {
    let c = &config.clustering;
    let clustering = match c.strategy {
        ClusterStrategy::Density => ClusteringParameters::Density(DensityParameters {
            eps: c.eps,
            min_samples: c.min_samples,
        }),
        ClusterStrategy::Partition => ClusteringParameters::Partition(PartitionParameters {
            k: c.k,
            seed: c.seed,
            max_iterations: c.max_iterations,
        }),
    };
    let ordering = match c.ordering {
        PathOrdering::Input => PathOrderer::InputOrder,
        PathOrdering::Nearest => PathOrderer::NearestNeighbor,
    };
    SynthesisParameters {
        clustering,
        ordering,
    }
}

/// Extraction parameters of a configuration
pub fn extraction_parameters(config: &Config) -> ExtractionParameters {
    let e = &config.extraction;
    ExtractionParameters {
        edge_detect: e.edge_detect,
        canny_low: e.canny_low,
        canny_high: e.canny_high,
        threshold: e.threshold,
        invert: e.invert,
        flip_y: e.flip_y,
        axis_order: match e.axis_order {
            AxisOrder::RowColumn => edgeplot_camtools::AxisOrder::RowColumn,
            AxisOrder::ColumnRow => edgeplot_camtools::AxisOrder::ColumnRow,
        },
    }
}
