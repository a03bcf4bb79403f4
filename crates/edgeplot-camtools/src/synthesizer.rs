//! Toolpath synthesis
//!
//! Runs the clustering, ordering and emission stages over one point set.
//! Each stage is a pure function of the previous stage's output; nothing is
//! shared between runs, so independent point sets can be synthesized on
//! separate threads.

use crate::clustering::{ClusteringParameters, Clusterer, PointClusterer};
use crate::emitter::CommandEmitter;
use crate::error::{CamToolResult, ParameterResult};
use crate::path_order::PathOrderer;
use edgeplot_core::{MotionCommand, PointSet, Stroke};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of a full synthesis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    pub clustering: ClusteringParameters,
    pub ordering: PathOrderer,
}

/// Result of synthesizing one point set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    /// One stroke per non-noise cluster, in ascending label order
    pub strokes: Vec<Stroke>,
    /// Number of input points
    pub point_count: usize,
    /// Number of input points labelled as noise
    pub noise_count: usize,
}

impl Toolpath {
    /// Flat command sequence in emission order
    pub fn commands(&self) -> impl Iterator<Item = &MotionCommand> + '_ {
        self.strokes.iter().flat_map(|s| s.commands.iter())
    }

    pub fn command_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Clusters, orders and emits a point set
#[derive(Debug, Clone)]
pub struct ToolpathSynthesizer {
    clusterer: Clusterer,
    orderer: PathOrderer,
    emitter: CommandEmitter,
}

impl ToolpathSynthesizer {
    /// Validate `params` and build a synthesizer
    pub fn new(params: &SynthesisParameters) -> ParameterResult<Self> {
        Ok(Self {
            clusterer: Clusterer::new(&params.clustering)?,
            orderer: params.ordering,
            emitter: CommandEmitter::new(),
        })
    }

    pub fn clusterer(&self) -> &Clusterer {
        &self.clusterer
    }

    /// Synthesize the toolpath for `points`.
    ///
    /// An empty point set is a valid input and yields an empty toolpath.
    pub fn synthesize(&self, points: &PointSet) -> CamToolResult<Toolpath> {
        let labels = self.clusterer.cluster(points);
        let clusters = labels.group(points)?;

        let paths: Vec<_> = clusters
            .iter()
            .map(|cluster| (cluster.label(), self.orderer.order(&cluster.points)))
            .collect();

        let strokes = self.emitter.emit_strokes(&paths);
        let toolpath = Toolpath {
            strokes,
            point_count: points.len(),
            noise_count: labels.noise_count(),
        };

        debug!(
            "Synthesized {} commands in {} strokes ({} strategy, {:?} ordering)",
            toolpath.command_count(),
            toolpath.stroke_count(),
            self.clusterer.name(),
            self.orderer
        );

        Ok(toolpath)
    }
}
