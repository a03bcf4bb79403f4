//! Point clustering
//!
//! Splits a point set into strokes. Two strategies share one interface,
//! [`PointClusterer`]:
//! - [`DensityClusterer`]: density-based; points in sparse regions become noise
//! - [`PartitionClusterer`]: exactly `k` centroid-based clusters, no noise
//!
//! Every strategy returns exactly one label per input point, index for index.

mod density;
mod partition;

pub use density::{DensityClusterer, DensityParameters};
pub use partition::{PartitionClusterer, PartitionParameters};

use crate::error::ParameterResult;
use edgeplot_core::{ClusterLabels, PointSet};
use serde::{Deserialize, Serialize};

/// Common interface of the clustering strategies
pub trait PointClusterer {
    /// Label every point of `points`; empty input yields empty labels
    fn cluster(&self, points: &PointSet) -> ClusterLabels;

    /// Short strategy name for logs and reports
    fn name(&self) -> &'static str;
}

/// Strategy selection together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ClusteringParameters {
    Density(DensityParameters),
    Partition(PartitionParameters),
}

impl Default for ClusteringParameters {
    fn default() -> Self {
        Self::Density(DensityParameters::default())
    }
}

/// A validated clusterer of either strategy
#[derive(Debug, Clone)]
pub enum Clusterer {
    Density(DensityClusterer),
    Partition(PartitionClusterer),
}

impl Clusterer {
    /// Validate `params` and build the matching clusterer
    pub fn new(params: &ClusteringParameters) -> ParameterResult<Self> {
        Ok(match params {
            ClusteringParameters::Density(p) => Self::Density(DensityClusterer::new(p.clone())?),
            ClusteringParameters::Partition(p) => {
                Self::Partition(PartitionClusterer::new(p.clone())?)
            }
        })
    }
}

impl PointClusterer for Clusterer {
    fn cluster(&self, points: &PointSet) -> ClusterLabels {
        match self {
            Self::Density(c) => c.cluster(points),
            Self::Partition(c) => c.cluster(points),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Density(c) => c.name(),
            Self::Partition(c) => c.name(),
        }
    }
}
