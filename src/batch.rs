//! Directory batch processing
//!
//! Every supported image in a directory is run through the same
//! [`Pipeline`] on the rayon pool. Jobs share nothing mutable, and a failing
//! image is recorded in its outcome instead of aborting the others.

use crate::pipeline::{ImageJob, ImageReport, Pipeline};
use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Image file extensions picked up in batch mode (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// Result of one image in a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub result: OutcomeResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum OutcomeResult {
    Ok(ImageReport),
    Failed { error: String },
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.result, OutcomeResult::Ok(_))
    }
}

/// Counts over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(outcomes: &[BatchOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Supported image files directly inside `dir`, sorted by path
pub fn collect_images(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_supported(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Output base name of every image: its stem, or its whole file name when
/// the stem would write the same output as another image
fn output_bases(images: &[PathBuf]) -> Vec<&OsStr> {
    let mut full_name = vec![false; images.len()];
    loop {
        let bases: Vec<&OsStr> = images
            .iter()
            .zip(&full_name)
            .map(|(input, &full)| {
                let name = if full { input.file_name() } else { input.file_stem() };
                name.unwrap_or_default()
            })
            .collect();

        let mut counts: HashMap<&OsStr, usize> = HashMap::new();
        for base in &bases {
            *counts.entry(*base).or_default() += 1;
        }

        let mut changed = false;
        for (i, base) in bases.iter().enumerate() {
            if counts[base] > 1 && !full_name[i] {
                debug!("{}: stem shared with another image", images[i].display());
                full_name[i] = true;
                changed = true;
            }
        }
        if !changed {
            return bases;
        }
    }
}

/// Jobs for `images`, writing `<stem>.gcode` (and `<stem>.svg`) files
///
/// Images sharing a stem (`cat.png`, `cat.bmp`) keep their whole file name
/// instead (`cat.png.gcode`, `cat.bmp.gcode`) so no two jobs write the same
/// output.
pub fn plan_jobs(
    images: &[PathBuf],
    output_dir: &Path,
    preview_dir: Option<&Path>,
) -> Vec<ImageJob> {
    images
        .iter()
        .zip(output_bases(images))
        .map(|(input, base)| {
            let named = |ext: &str| {
                let mut name = base.to_os_string();
                name.push(".");
                name.push(ext);
                name
            };
            let mut job = ImageJob::new(input.clone(), output_dir.join(named("gcode")));
            if let Some(dir) = preview_dir {
                job = job.with_preview(dir.join(named("svg")));
            }
            job
        })
        .collect()
}

/// Process every supported image of `input_dir` in parallel
pub fn run_batch(
    pipeline: &Pipeline,
    input_dir: &Path,
    output_dir: &Path,
    preview_dir: Option<&Path>,
) -> anyhow::Result<Vec<BatchOutcome>> {
    let images = collect_images(input_dir)?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    if let Some(dir) = preview_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    info!(
        "Processing {} images from {} on {} threads",
        images.len(),
        input_dir.display(),
        rayon::current_num_threads()
    );

    let jobs = plan_jobs(&images, output_dir, preview_dir);
    let outcomes: Vec<BatchOutcome> = jobs
        .par_iter()
        .map(|job| {
            let result = match pipeline.run(job) {
                Ok(report) => OutcomeResult::Ok(report),
                Err(e) => {
                    error!("{}: {:#}", job.input.display(), e);
                    OutcomeResult::Failed {
                        error: format!("{:#}", e),
                    }
                }
            };
            BatchOutcome {
                input: job.input.clone(),
                result,
            }
        })
        .collect();

    let summary = BatchSummary::of(&outcomes);
    info!(
        "Batch finished: {} of {} images succeeded",
        summary.succeeded, summary.total
    );
    Ok(outcomes)
}
