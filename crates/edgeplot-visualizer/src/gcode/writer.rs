//! Command file writer
//!
//! Files are written to a temporary file in the destination directory and
//! renamed over the target only after the content has been flushed, so a
//! reader never sees a partially written command file.

use crate::error::{VisualizerError, VisualizerResult};
use edgeplot_core::{MotionCommand, Stroke};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Renders strokes as command file text
#[derive(Debug, Clone, Copy)]
pub struct CommandWriter {
    cluster_markers: bool,
}

impl Default for CommandWriter {
    fn default() -> Self {
        Self {
            cluster_markers: true,
        }
    }
}

impl CommandWriter {
    pub fn new(cluster_markers: bool) -> Self {
        Self { cluster_markers }
    }

    pub fn cluster_markers(&self) -> bool {
        self.cluster_markers
    }

    /// Render strokes, one command per line, each line newline terminated
    pub fn render(&self, strokes: &[Stroke]) -> String {
        let lines: usize = strokes
            .iter()
            .map(|s| s.len() + usize::from(self.cluster_markers))
            .sum();
        let mut out = String::with_capacity(lines * 16);

        for stroke in strokes {
            if self.cluster_markers {
                out.push_str(&format!("(Cluster {})\n", stroke.label));
            }
            for command in &stroke.commands {
                push_line(&mut out, command);
            }
        }
        out
    }

    /// Render a flat command sequence without markers
    pub fn render_commands<'a, I>(&self, commands: I) -> String
    where
        I: IntoIterator<Item = &'a MotionCommand>,
    {
        let mut out = String::new();
        for command in commands {
            push_line(&mut out, command);
        }
        out
    }

    /// Render `strokes` and write them atomically to `path`
    pub fn write_file(&self, path: impl AsRef<Path>, strokes: &[Stroke]) -> VisualizerResult<()> {
        let path = path.as_ref();
        let content = self.render(strokes);
        write_atomic(path, content.as_bytes())?;
        debug!(
            "Wrote {} strokes ({} bytes) to {}",
            strokes.len(),
            content.len(),
            path.display()
        );
        Ok(())
    }
}

fn push_line(out: &mut String, command: &MotionCommand) {
    out.push_str(&command.to_string());
    out.push('\n');
}

/// Write `content` to `path` through a temporary sibling file
pub fn write_atomic(path: &Path, content: &[u8]) -> VisualizerResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.flush()?;
    file.as_file().sync_all()?;

    file.persist(path)
        .map_err(|e| VisualizerError::PersistError {
            path: path.display().to_string(),
            source: e.error,
        })?;
    Ok(())
}
