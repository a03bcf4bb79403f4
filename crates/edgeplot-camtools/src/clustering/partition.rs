//! Partition clustering (k-means).
//!
//! Points are split into exactly `k` clusters by alternating between assigning
//! every point to its nearest centroid and moving each centroid to the mean of
//! its points. Centroids start from a k-means++ draw on a seeded generator, so
//! a given seed always reproduces the same labels.

use super::PointClusterer;
use crate::error::{ParameterError, ParameterResult};
use edgeplot_core::{ClusterLabel, ClusterLabels, PointSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Partition clustering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionParameters {
    /// Number of clusters
    pub k: usize,
    /// Seed for centroid initialisation
    pub seed: u64,
    /// Upper bound on assignment passes
    pub max_iterations: usize,
}

impl Default for PartitionParameters {
    fn default() -> Self {
        Self {
            k: 30,
            seed: 0,
            max_iterations: 300,
        }
    }
}

impl PartitionParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        if self.k == 0 {
            return Err(ParameterError::invalid("k", "must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(ParameterError::invalid("max_iterations", "must be > 0"));
        }
        Ok(())
    }
}

/// Lloyd's k-means with k-means++ seeding
#[derive(Debug, Clone)]
pub struct PartitionClusterer {
    params: PartitionParameters,
}

impl PartitionClusterer {
    pub fn new(params: PartitionParameters) -> ParameterResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PartitionParameters {
        &self.params
    }

    /// k-means++: each further centroid is drawn with probability
    /// proportional to its squared distance from the closest chosen one
    fn initial_centroids(&self, coords: &[[f64; 2]]) -> Vec<[f64; 2]> {
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut centroids = Vec::with_capacity(self.params.k);
        centroids.push(coords[rng.gen_range(0..coords.len())]);

        let mut closest: Vec<f64> = coords
            .iter()
            .map(|c| distance_squared(c, &centroids[0]))
            .collect();

        while centroids.len() < self.params.k {
            let total: f64 = closest.iter().sum();
            let next = if total > 0.0 {
                let mut target = rng.gen::<f64>() * total;
                let mut chosen = coords.len() - 1;
                for (i, d) in closest.iter().enumerate() {
                    if *d > 0.0 && target < *d {
                        chosen = i;
                        break;
                    }
                    target -= d;
                }
                chosen
            } else {
                // Every point already coincides with a centroid
                rng.gen_range(0..coords.len())
            };

            let centroid = coords[next];
            for (d, c) in closest.iter_mut().zip(coords) {
                *d = d.min(distance_squared(c, &centroid));
            }
            centroids.push(centroid);
        }

        centroids
    }
}

impl PointClusterer for PartitionClusterer {
    fn cluster(&self, points: &PointSet) -> ClusterLabels {
        if points.is_empty() {
            return ClusterLabels::new();
        }

        let n = points.len();
        if self.params.k >= n {
            debug!(
                "Partition clustering: k={} >= {} points, one cluster per point",
                self.params.k, n
            );
            return (0..n as u32).map(ClusterLabel::Cluster).collect();
        }

        let coords: Vec<[f64; 2]> = points.iter().map(|p| p.to_f64()).collect();
        let mut centroids = self.initial_centroids(&coords);
        let mut assignment = assign(&coords, &centroids);
        let mut iterations = 1;
        let mut converged = false;

        while iterations < self.params.max_iterations {
            update_centroids(&coords, &assignment, &mut centroids);
            let next = assign(&coords, &centroids);
            iterations += 1;
            if next == assignment {
                converged = true;
                break;
            }
            trace!("Partition iteration {}: assignments changed", iterations);
            assignment = next;
        }

        debug!(
            "Partition clustering (k={}, seed={}): {} points, {} iterations, converged={}",
            self.params.k, self.params.seed, n, iterations, converged
        );

        assignment
            .into_iter()
            .map(|c| ClusterLabel::Cluster(c as u32))
            .collect()
    }

    fn name(&self) -> &'static str {
        "partition"
    }
}

fn distance_squared(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Index of the nearest centroid for every point; ties go to the lower index
fn assign(coords: &[[f64; 2]], centroids: &[[f64; 2]]) -> Vec<usize> {
    coords
        .iter()
        .map(|c| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (i, centroid) in centroids.iter().enumerate() {
                let d = distance_squared(c, centroid);
                if d < best_distance {
                    best = i;
                    best_distance = d;
                }
            }
            best
        })
        .collect()
}

/// Move centroids to the mean of their points; empty clusters stay put
fn update_centroids(coords: &[[f64; 2]], assignment: &[usize], centroids: &mut [[f64; 2]]) {
    let mut sums = vec![[0.0f64; 2]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (c, &cluster) in coords.iter().zip(assignment) {
        sums[cluster][0] += c[0];
        sums[cluster][1] += c[1];
        counts[cluster] += 1;
    }

    for ((centroid, sum), count) in centroids.iter_mut().zip(&sums).zip(&counts) {
        if *count > 0 {
            let n = *count as f64;
            *centroid = [sum[0] / n, sum[1] / n];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeplot_core::Point;

    fn points(coords: &[(i32, i32)]) -> PointSet {
        coords.iter().copied().map(Point::from).collect()
    }

    fn clusterer(k: usize, seed: u64) -> PartitionClusterer {
        PartitionClusterer::new(PartitionParameters {
            k,
            seed,
            max_iterations: 100,
        })
        .unwrap()
    }

    #[test]
    fn test_single_cluster() {
        let labels = clusterer(1, 7).cluster(&points(&[(0, 0), (50, 3), (-9, 80)]));
        assert!(labels.iter().all(|l| l == ClusterLabel::Cluster(0)));
    }

    #[test]
    fn test_separated_groups() {
        let set = points(&[(0, 0), (200, 200), (1, 0), (201, 200), (0, 1), (200, 201)]);
        let labels = clusterer(2, 3).cluster(&set);
        assert_eq!(labels.cluster_count(), 2);
        assert_eq!(labels.get(0), labels.get(2));
        assert_eq!(labels.get(0), labels.get(4));
        assert_eq!(labels.get(1), labels.get(3));
        assert_eq!(labels.get(1), labels.get(5));
        assert_ne!(labels.get(0), labels.get(1));
    }

    #[test]
    fn test_same_seed_same_labels() {
        let set: PointSet = (0..200)
            .map(|i| Point::new((i * 37) % 101, (i * 53) % 89))
            .collect();
        let a = clusterer(6, 11).cluster(&set);
        let b = clusterer(6, 11).cluster(&set);
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_at_least_point_count() {
        let labels = clusterer(5, 0).cluster(&points(&[(4, 4), (4, 4), (9, 9)]));
        assert_eq!(
            labels.as_slice(),
            &[
                ClusterLabel::Cluster(0),
                ClusterLabel::Cluster(1),
                ClusterLabel::Cluster(2)
            ]
        );
    }

    #[test]
    fn test_coincident_points_do_not_panic() {
        let set = points(&[(3, 3); 10]);
        let labels = clusterer(4, 1).cluster(&set);
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.noise_count(), 0);
    }

    #[test]
    fn test_single_iteration_cap() {
        let set = points(&[(0, 0), (1, 0), (100, 0), (101, 0)]);
        let clusterer = PartitionClusterer::new(PartitionParameters {
            k: 2,
            seed: 5,
            max_iterations: 1,
        })
        .unwrap();
        assert_eq!(clusterer.cluster(&set).len(), 4);
    }

    #[test]
    fn test_assign_ties_go_to_lower_index() {
        let coords = [[5.0, 0.0]];
        let centroids = [[0.0, 0.0], [10.0, 0.0]];
        assert_eq!(assign(&coords, &centroids), vec![0]);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let coords = [[0.0, 0.0], [2.0, 0.0]];
        let mut centroids = [[0.0, 0.0], [50.0, 50.0]];
        update_centroids(&coords, &[0, 0], &mut centroids);
        assert_eq!(centroids, [[1.0, 0.0], [50.0, 50.0]]);
    }
}
