//! Path ordering
//!
//! Decides the order in which the points of one cluster are drawn.
//!
//! The reference ordering keeps the extractor's scan order. It is cheap,
//! deterministic and always terminates, but a stroke that crosses several
//! scan rows is drawn with long jumps between rows. The nearest-neighbour
//! walk trades speed for shorter draw moves.

use edgeplot_core::{Path, Point};
use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Intra-cluster point ordering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathOrderer {
    /// Keep the relative input order
    #[default]
    InputOrder,
    /// Start at the first input point and always move to the closest
    /// unvisited point; ties go to the earlier input point
    NearestNeighbor,
}

impl PathOrderer {
    /// Order the points of one cluster into a path
    pub fn order(&self, points: &[Point]) -> Path {
        match self {
            Self::InputOrder => Path::new(points.to_vec()),
            Self::NearestNeighbor => Path::new(nearest_neighbor_walk(points)),
        }
    }
}

fn nearest_neighbor_walk(points: &[Point]) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut tree = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, p)| IndexedPoint::new(p.to_f64(), i))
            .collect(),
    );

    let mut ordered = Vec::with_capacity(points.len());
    ordered.push(*first);
    let mut current = first.to_f64();

    while tree.size() > 0 {
        let Some(next) = closest_lowest_index(&tree, current) else {
            break;
        };
        tree.remove(&next);
        ordered.push(points[next.data]);
        current = *next.geom();
    }

    ordered
}

/// Nearest entry to `from`; among equally near entries the lowest index wins
fn closest_lowest_index(tree: &RTree<IndexedPoint>, from: [f64; 2]) -> Option<IndexedPoint> {
    let mut candidates = tree.nearest_neighbor_iter_with_distance_2(&from);
    let (first, best_distance) = candidates.next()?;
    let mut best = *first;
    for (candidate, distance) in candidates {
        if distance > best_distance {
            break;
        }
        if candidate.data < best.data {
            best = *candidate;
        }
    }
    Some(best)
}
