use edgeplot_camtools::{
    ClusteringParameters, DensityParameters, PartitionParameters, PathOrderer,
    SynthesisParameters, ToolpathSynthesizer,
};
use edgeplot_core::{MotionCommand, Point, PointSet};

fn points(coords: &[(i32, i32)]) -> PointSet {
    coords.iter().copied().map(Point::from).collect()
}

fn synthesizer(clustering: ClusteringParameters) -> ToolpathSynthesizer {
    ToolpathSynthesizer::new(&SynthesisParameters {
        clustering,
        ordering: PathOrderer::InputOrder,
    })
    .unwrap()
}

#[test]
fn test_outlier_is_dropped() {
    let toolpath = synthesizer(ClusteringParameters::Density(DensityParameters {
        eps: 10.0,
        min_samples: 2,
    }))
    .synthesize(&points(&[(0, 0), (1, 1), (50, 50)]))
    .unwrap();

    let commands: Vec<MotionCommand> = toolpath.commands().copied().collect();
    assert_eq!(
        commands,
        vec![
            MotionCommand::Travel(Point::new(0, 0)),
            MotionCommand::Draw(Point::new(1, 1)),
        ]
    );
}

#[test]
fn test_empty_input_gives_empty_output() {
    for clustering in [
        ClusteringParameters::default(),
        ClusteringParameters::Partition(PartitionParameters::default()),
    ] {
        let toolpath = synthesizer(clustering)
            .synthesize(&PointSet::new())
            .unwrap();
        assert_eq!(toolpath.command_count(), 0);
    }
}

#[test]
fn test_one_partition_draws_everything_in_input_order() {
    let set: PointSet = (0..25).map(|i| Point::new((i * 11) % 17, i)).collect();
    let toolpath = synthesizer(ClusteringParameters::Partition(PartitionParameters {
        k: 1,
        seed: 99,
        max_iterations: 10,
    }))
    .synthesize(&set)
    .unwrap();

    let commands: Vec<MotionCommand> = toolpath.commands().copied().collect();
    assert_eq!(commands.len(), set.len());
    assert!(commands[0].is_travel());
    assert_eq!(commands.iter().filter(|c| c.is_travel()).count(), 1);
    let order: Vec<Point> = commands.iter().map(|c| c.point()).collect();
    assert_eq!(order, set.as_slice().to_vec());
}

#[test]
fn test_single_point_cluster_is_one_travel() {
    let toolpath = synthesizer(ClusteringParameters::Density(DensityParameters {
        eps: 1.0,
        min_samples: 1,
    }))
    .synthesize(&points(&[(7, 7)]))
    .unwrap();

    let commands: Vec<MotionCommand> = toolpath.commands().copied().collect();
    assert_eq!(commands, vec![MotionCommand::Travel(Point::new(7, 7))]);
}

#[test]
fn test_two_strokes_are_separated_by_travel() {
    let set = points(&[(0, 0), (1, 0), (2, 0), (100, 0), (101, 0), (102, 0)]);
    let toolpath = synthesizer(ClusteringParameters::Density(DensityParameters {
        eps: 1.5,
        min_samples: 2,
    }))
    .synthesize(&set)
    .unwrap();

    let lines: Vec<String> = toolpath.commands().map(|c| c.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "G0 X0 Y0",
            "G1 X1 Y0",
            "G1 X2 Y0",
            "G0 X100 Y0",
            "G1 X101 Y0",
            "G1 X102 Y0",
        ]
    );
}

#[test]
fn test_nearest_neighbor_ordering_shortens_draws() {
    // A "V" whose arms interleave in scan order
    let set = points(&[(0, 0), (8, 0), (1, 1), (7, 1), (2, 2), (6, 2), (3, 3), (5, 3), (4, 4)]);
    let clustering = ClusteringParameters::Partition(PartitionParameters {
        k: 1,
        ..Default::default()
    });

    let draw_length = |ordering| {
        let toolpath = ToolpathSynthesizer::new(&SynthesisParameters {
            clustering: clustering.clone(),
            ordering,
        })
        .unwrap()
        .synthesize(&set)
        .unwrap();
        let commands: Vec<MotionCommand> = toolpath.commands().copied().collect();
        commands
            .windows(2)
            .filter(|w| w[1].is_draw())
            .map(|w| w[0].point().distance_to(&w[1].point()))
            .sum::<f64>()
    };

    assert!(draw_length(PathOrderer::NearestNeighbor) < draw_length(PathOrderer::InputOrder));
}
