use super::{Point, PointSet};
use crate::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Stroke assignment of a single point
///
/// `Noise` sorts before every cluster, so a sorted sequence of labels visits
/// noise first and then clusters in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClusterLabel {
    /// Not part of any stroke; never emitted
    Noise,
    /// Member of the stroke with the given id
    Cluster(u32),
}

impl ClusterLabel {
    pub fn is_noise(&self) -> bool {
        matches!(self, Self::Noise)
    }

    /// Cluster id, or `None` for noise
    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Noise => None,
            Self::Cluster(id) => Some(*id),
        }
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noise => write!(f, "noise"),
            Self::Cluster(id) => write!(f, "{}", id),
        }
    }
}

/// One label per point of a [`PointSet`], index for index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterLabels {
    labels: Vec<ClusterLabel>,
}

impl ClusterLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ClusterLabel> {
        self.labels.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClusterLabel> + '_ {
        self.labels.iter().copied()
    }

    pub fn as_slice(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Distinct cluster ids in ascending order
    pub fn cluster_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.labels.iter().filter_map(ClusterLabel::id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of distinct clusters (noise excluded)
    pub fn cluster_count(&self) -> usize {
        self.cluster_ids().len()
    }

    /// Number of points labelled as noise
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_noise()).count()
    }

    /// Group the points of `points` by label.
    ///
    /// Clusters come back in ascending id order and each keeps the relative
    /// input order of its points. Noise points are dropped.
    pub fn group(&self, points: &PointSet) -> DataResult<Vec<Cluster>> {
        if points.len() != self.labels.len() {
            return Err(DataError::LabelCountMismatch {
                points: points.len(),
                labels: self.labels.len(),
            });
        }

        let mut grouped: BTreeMap<u32, Vec<Point>> = BTreeMap::new();
        for (point, label) in points.iter().zip(&self.labels) {
            if let ClusterLabel::Cluster(id) = label {
                grouped.entry(*id).or_default().push(*point);
            }
        }

        trace!(
            "Grouped {} points into {} clusters ({} noise)",
            points.len(),
            grouped.len(),
            self.noise_count()
        );

        Ok(grouped
            .into_iter()
            .map(|(id, points)| Cluster { id, points })
            .collect())
    }
}

impl From<Vec<ClusterLabel>> for ClusterLabels {
    fn from(labels: Vec<ClusterLabel>) -> Self {
        Self { labels }
    }
}

impl FromIterator<ClusterLabel> for ClusterLabels {
    fn from_iter<I: IntoIterator<Item = ClusterLabel>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// The points sharing one cluster id, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: u32,
    pub points: Vec<Point>,
}

impl Cluster {
    pub fn label(&self) -> ClusterLabel {
        ClusterLabel::Cluster(self.id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
