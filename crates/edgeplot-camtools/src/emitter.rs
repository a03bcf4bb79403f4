//! Command emission
//!
//! Converts ordered cluster paths into pen-up/pen-down motion commands.
//! Every cluster starts with a travel to its first point and continues with
//! draws, so the pen is always lifted between two clusters and no line is
//! ever drawn joining them.

use edgeplot_core::{ClusterLabel, MotionCommand, Path, Stroke};
use tracing::debug;

/// Emits motion commands for labelled paths
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandEmitter;

impl CommandEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Emit one stroke per cluster in ascending label order.
    ///
    /// Noise paths and empty paths produce nothing. Paths with equal labels
    /// keep their relative order.
    pub fn emit_strokes(&self, paths: &[(ClusterLabel, Path)]) -> Vec<Stroke> {
        let mut ordered: Vec<&(ClusterLabel, Path)> = paths.iter().collect();
        ordered.sort_by_key(|(label, _)| *label);

        let strokes: Vec<Stroke> = ordered
            .into_iter()
            .filter_map(|(label, path)| {
                let id = label.id()?;
                let (first, rest) = path.points().split_first()?;
                let mut commands = Vec::with_capacity(path.len());
                commands.push(MotionCommand::Travel(*first));
                commands.extend(rest.iter().copied().map(MotionCommand::Draw));
                Some(Stroke {
                    label: id,
                    commands,
                })
            })
            .collect();

        debug!(
            "Emitted {} strokes from {} labelled paths",
            strokes.len(),
            paths.len()
        );
        strokes
    }

    /// Emit the flat command sequence
    pub fn emit(&self, paths: &[(ClusterLabel, Path)]) -> Vec<MotionCommand> {
        self.emit_strokes(paths)
            .into_iter()
            .flat_map(|stroke| stroke.commands)
            .collect()
    }
}
