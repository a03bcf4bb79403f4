use anyhow::Context;
use clap::Parser;
use edgeplot::batch::{run_batch, BatchSummary};
use edgeplot::cli::Args;
use edgeplot::pipeline::{replay, ImageJob, Pipeline};
use edgeplot::{init_logging, BUILD_DATE, VERSION};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose)?;
    debug!("edgeplot {} (built {})", VERSION, BUILD_DATE);

    if args.replay {
        let config = args.load_config()?;
        let report = replay(
            &args.input,
            &args.output,
            config.output.preview_travel,
            config.extraction.flip_y,
        )?;
        return write_report(args.report.as_deref(), &report);
    }

    let config = args.load_config()?;
    let pipeline = Pipeline::from_config(&config)?;

    if args.input.is_dir() {
        let outcomes = run_batch(
            &pipeline,
            &args.input,
            &args.output,
            args.preview.as_deref(),
        )?;
        write_report(args.report.as_deref(), &outcomes)?;

        let summary = BatchSummary::of(&outcomes);
        if summary.failed > 0 {
            anyhow::bail!("{} of {} images failed", summary.failed, summary.total);
        }
        return Ok(());
    }

    let mut job = ImageJob::new(&args.input, &args.output);
    if let Some(preview) = &args.preview {
        job = job.with_preview(preview);
    }
    let report = pipeline.run(&job)?;
    info!("{}", report.stats);
    write_report(args.report.as_deref(), &report)
}

fn write_report<T: Serialize>(path: Option<&Path>, report: &T) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    debug!("Wrote report to {}", path.display());
    Ok(())
}
