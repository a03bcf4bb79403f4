use edgeplot_camtools::{
    Clusterer, ClusteringParameters, DensityParameters, PartitionParameters, PathOrderer,
    PointClusterer, SynthesisParameters, ToolpathSynthesizer,
};
use edgeplot_core::{ClusterLabel, Point, PointSet};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_point_set() -> impl Strategy<Value = PointSet> {
    prop::collection::hash_set((0i32..80, 0i32..80), 0..120).prop_map(|coords| {
        let mut coords: Vec<_> = coords.into_iter().collect();
        // Row-major, like the extractor
        coords.sort_by_key(|&(x, y)| (y, x));
        coords.into_iter().map(Point::from).collect()
    })
}

fn arb_clustering() -> impl Strategy<Value = ClusteringParameters> {
    prop_oneof![
        (0.0f64..12.0, 1usize..6).prop_map(|(eps, min_samples)| {
            ClusteringParameters::Density(DensityParameters { eps, min_samples })
        }),
        (1usize..12, any::<u64>()).prop_map(|(k, seed)| {
            ClusteringParameters::Partition(PartitionParameters {
                k,
                seed,
                max_iterations: 50,
            })
        }),
    ]
}

fn arb_ordering() -> impl Strategy<Value = PathOrderer> {
    prop_oneof![Just(PathOrderer::InputOrder), Just(PathOrderer::NearestNeighbor)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn commands_only_use_input_points(
        set in arb_point_set(),
        clustering in arb_clustering(),
        ordering in arb_ordering(),
    ) {
        let toolpath = ToolpathSynthesizer::new(&SynthesisParameters { clustering, ordering })
            .unwrap()
            .synthesize(&set)
            .unwrap();
        for command in toolpath.commands() {
            prop_assert!(set.contains(&command.point()));
        }
    }

    #[test]
    fn every_stroke_starts_with_exactly_one_travel(
        set in arb_point_set(),
        clustering in arb_clustering(),
        ordering in arb_ordering(),
    ) {
        let toolpath = ToolpathSynthesizer::new(&SynthesisParameters { clustering, ordering })
            .unwrap()
            .synthesize(&set)
            .unwrap();
        for stroke in &toolpath.strokes {
            prop_assert!(stroke.commands[0].is_travel());
            prop_assert!(stroke.commands[1..].iter().all(|c| c.is_draw()));
        }
        if let Some(first) = toolpath.commands().next() {
            prop_assert!(first.is_travel());
        };
    }

    #[test]
    fn clustering_is_repeatable(set in arb_point_set(), clustering in arb_clustering()) {
        let clusterer = Clusterer::new(&clustering).unwrap();
        prop_assert_eq!(clusterer.cluster(&set), clusterer.cluster(&set));
        prop_assert_eq!(clusterer.cluster(&set).len(), set.len());
    }

    #[test]
    fn noise_points_are_never_emitted(
        set in arb_point_set(),
        eps in 0.0f64..6.0,
        min_samples in 2usize..6,
    ) {
        let clustering = ClusteringParameters::Density(DensityParameters { eps, min_samples });
        let labels = Clusterer::new(&clustering).unwrap().cluster(&set);
        let noise: HashSet<Point> = set
            .iter()
            .zip(labels.iter())
            .filter(|(_, l)| *l == ClusterLabel::Noise)
            .map(|(p, _)| *p)
            .collect();

        let toolpath = ToolpathSynthesizer::new(&SynthesisParameters {
            clustering,
            ordering: PathOrderer::InputOrder,
        })
        .unwrap()
        .synthesize(&set)
        .unwrap();

        for command in toolpath.commands() {
            prop_assert!(!noise.contains(&command.point()));
        }
        prop_assert_eq!(toolpath.command_count() + toolpath.noise_count, set.len());
    }
}
