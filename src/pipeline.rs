//! Single-image pipeline
//!
//! Image file in, command file out: extract edge points, synthesize the
//! toolpath, write it atomically and optionally render a preview.

use crate::{extraction_parameters, synthesis_parameters};
use anyhow::Context;
use edgeplot_camtools::{EdgePointExtractor, Toolpath, ToolpathSynthesizer};
use edgeplot_settings::Config;
use edgeplot_visualizer::{
    CommandParser, CommandWriter, PlaybackStats, SvgPreview, ToolpathPlayer,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Input and output locations of one image run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
}

impl ImageJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            preview: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<PathBuf>) -> Self {
        self.preview = Some(preview.into());
        self
    }
}

/// Summary of one processed image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub points: usize,
    pub clusters: usize,
    pub noise: usize,
    pub commands: usize,
    pub stats: PlaybackStats,
}

/// Extractor, synthesizer and writer built from one validated configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: EdgePointExtractor,
    synthesizer: ToolpathSynthesizer,
    writer: CommandWriter,
    preview_travel: bool,
    y_up: bool,
}

impl Pipeline {
    /// Validate `config` and build the pipeline
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate().context("invalid configuration")?;
        let synthesizer = ToolpathSynthesizer::new(&synthesis_parameters(config))
            .context("invalid clustering parameters")?;

        Ok(Self {
            extractor: EdgePointExtractor::new(extraction_parameters(config)),
            synthesizer,
            writer: CommandWriter::new(config.output.cluster_markers),
            preview_travel: config.output.preview_travel,
            y_up: config.extraction.flip_y,
        })
    }

    /// Extract and synthesize without touching the output
    pub fn synthesize(&self, input: &Path) -> anyhow::Result<Toolpath> {
        let points = self
            .extractor
            .extract_file(input)
            .with_context(|| format!("failed to read image {}", input.display()))?;
        debug!("{}: {} edge points", input.display(), points.len());

        if points.is_empty() {
            warn!("{}: no foreground pixels, writing an empty toolpath", input.display());
        }

        self.synthesizer
            .synthesize(&points)
            .with_context(|| format!("failed to synthesize toolpath for {}", input.display()))
    }

    /// Run one image end to end
    pub fn run(&self, job: &ImageJob) -> anyhow::Result<ImageReport> {
        let toolpath = self.synthesize(&job.input)?;

        self.writer
            .write_file(&job.output, &toolpath.strokes)
            .with_context(|| format!("failed to write {}", job.output.display()))?;

        let mut stats = PlaybackStats::new();
        match &job.preview {
            Some(preview_path) => {
                let preview = SvgPreview::new(self.preview_travel).with_y_up(self.y_up);
                let mut player = ToolpathPlayer::new((&mut stats, preview));
                player.play(toolpath.commands());
                let (_, preview) = player.into_sink();
                preview
                    .write_file(preview_path)
                    .with_context(|| format!("failed to write {}", preview_path.display()))?;
            }
            None => ToolpathPlayer::new(&mut stats).play(toolpath.commands()),
        }

        let report = ImageReport {
            input: job.input.clone(),
            output: job.output.clone(),
            points: toolpath.point_count,
            clusters: toolpath.stroke_count(),
            noise: toolpath.noise_count,
            commands: toolpath.command_count(),
            stats,
        };

        info!(
            "{} -> {}: {} points, {} strokes, {} noise, {} commands",
            report.input.display(),
            report.output.display(),
            report.points,
            report.clusters,
            report.noise,
            report.commands
        );
        Ok(report)
    }
}

/// Summary of a replayed command file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub commands: usize,
    pub markers: usize,
    pub skipped: usize,
    pub stats: PlaybackStats,
}

/// Parse an existing command file, play it and write its SVG preview
///
/// `y_up` must match the `flip_y` setting the file was written with so the
/// preview has the same orientation as one written by [`Pipeline::run`].
pub fn replay(
    commands: &Path,
    svg: &Path,
    show_travel: bool,
    y_up: bool,
) -> anyhow::Result<ReplayReport> {
    let program = CommandParser::new()
        .read_file(commands)
        .with_context(|| format!("failed to read {}", commands.display()))?;

    let rejected = program.rejected_count();
    if rejected > 0 {
        warn!(
            "{}: skipped {} unrecognized lines",
            commands.display(),
            rejected
        );
    }

    let mut player = ToolpathPlayer::new((
        PlaybackStats::new(),
        SvgPreview::new(show_travel).with_y_up(y_up),
    ));
    player.play(&program.commands);
    let (stats, preview) = player.into_sink();

    preview
        .write_file(svg)
        .with_context(|| format!("failed to write {}", svg.display()))?;

    info!("{}: {}", commands.display(), stats);
    Ok(ReplayReport {
        commands: program.commands.len(),
        markers: program.markers.len(),
        skipped: rejected,
        stats,
    })
}
