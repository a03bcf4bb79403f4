use edgeplot_core::{ClusterLabel, ClusterLabels, MotionCommand, Point, PointSet};
use proptest::prelude::*;

fn arb_points() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-500i32..500, -500i32..500), 0..64)
}

proptest! {
    #[test]
    fn grouping_never_invents_points(coords in arb_points(), seed in 0u32..4) {
        let points: PointSet = coords.iter().copied().map(Point::from).collect();
        let labels: ClusterLabels = (0..points.len())
            .map(|i| {
                if (i as u32 + seed) % 5 == 0 {
                    ClusterLabel::Noise
                } else {
                    ClusterLabel::Cluster((i as u32 + seed) % 3)
                }
            })
            .collect();

        let clusters = labels.group(&points).unwrap();
        let grouped: usize = clusters.iter().map(|c| c.len()).sum();
        prop_assert_eq!(grouped + labels.noise_count(), points.len());

        let mut last_id = None;
        for cluster in &clusters {
            prop_assert!(last_id.map_or(true, |id| id < cluster.id));
            last_id = Some(cluster.id);
            for p in &cluster.points {
                prop_assert!(points.contains(p));
            }
        }
    }

    #[test]
    fn command_display_matches_file_grammar(x in -10_000i32..10_000, y in -10_000i32..10_000) {
        let line = MotionCommand::Draw(Point::new(x, y)).to_string();
        prop_assert_eq!(line, format!("G1 X{} Y{}", x, y));
    }
}
