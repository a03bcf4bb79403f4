//! Density-based clustering (DBSCAN).
//!
//! A point is a core point when at least `min_samples` points, itself
//! included, lie within `eps` of it. Clusters grow outward from core points;
//! points reachable from a core point but not core themselves join the first
//! cluster that reaches them. Whatever is left is noise.

use super::PointClusterer;
use crate::error::{ParameterError, ParameterResult};
use edgeplot_core::{ClusterLabel, ClusterLabels, PointSet};
use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use tracing::debug;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Density clustering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityParameters {
    /// Neighbourhood radius (inclusive)
    pub eps: f64,
    /// Neighbourhood size, the point itself included, that makes a core point
    pub min_samples: usize,
}

impl Default for DensityParameters {
    fn default() -> Self {
        Self {
            eps: 10.0,
            min_samples: 5,
        }
    }
}

impl DensityParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ParameterError::invalid(
                "eps",
                format!("must be a finite value >= 0, got {}", self.eps),
            ));
        }
        if self.min_samples == 0 {
            return Err(ParameterError::invalid("min_samples", "must be > 0"));
        }
        Ok(())
    }
}

/// DBSCAN over an R*-tree neighbourhood index
#[derive(Debug, Clone)]
pub struct DensityClusterer {
    params: DensityParameters,
}

impl DensityClusterer {
    pub fn new(params: DensityParameters) -> ParameterResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DensityParameters {
        &self.params
    }
}

impl PointClusterer for DensityClusterer {
    fn cluster(&self, points: &PointSet) -> ClusterLabels {
        if points.is_empty() {
            return ClusterLabels::new();
        }

        let coords: Vec<[f64; 2]> = points.iter().map(|p| p.to_f64()).collect();
        let tree = RTree::bulk_load(
            coords
                .iter()
                .enumerate()
                .map(|(i, c)| IndexedPoint::new(*c, i))
                .collect(),
        );
        let eps_2 = self.params.eps * self.params.eps;
        let min_samples = self.params.min_samples;

        let is_core: Vec<bool> = coords
            .iter()
            .map(|c| {
                tree.locate_within_distance(*c, eps_2)
                    .take(min_samples)
                    .count()
                    >= min_samples
            })
            .collect();

        let mut assigned: Vec<Option<u32>> = vec![None; coords.len()];
        let mut next_label = 0u32;
        let mut stack = Vec::new();

        for seed in 0..coords.len() {
            if assigned[seed].is_some() || !is_core[seed] {
                continue;
            }

            let label = next_label;
            next_label += 1;
            assigned[seed] = Some(label);
            stack.push(seed);

            while let Some(current) = stack.pop() {
                for neighbour in tree.locate_within_distance(coords[current], eps_2) {
                    let idx = neighbour.data;
                    if assigned[idx].is_some() {
                        continue;
                    }
                    assigned[idx] = Some(label);
                    // Border points are labelled but do not expand the cluster
                    if is_core[idx] {
                        stack.push(idx);
                    }
                }
            }
        }

        let labels: ClusterLabels = assigned
            .into_iter()
            .map(|a| a.map_or(ClusterLabel::Noise, ClusterLabel::Cluster))
            .collect();

        debug!(
            "Density clustering (eps={}, min_samples={}): {} points -> {} clusters, {} noise",
            self.params.eps,
            min_samples,
            points.len(),
            next_label,
            labels.noise_count()
        );

        labels
    }

    fn name(&self) -> &'static str {
        "density"
    }
}
