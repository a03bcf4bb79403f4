use edgeplot_core::{MotionCommand, Point, Stroke};
use edgeplot_visualizer::{parse_str, CommandWriter};
use proptest::prelude::*;

fn stroke_strategy() -> impl Strategy<Value = Stroke> {
    (
        0u32..50,
        prop::collection::vec((-5000i32..5000, -5000i32..5000), 1..20),
    )
        .prop_map(|(label, coords)| {
            let commands = coords
                .into_iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    let p = Point::new(x, y);
                    if i == 0 {
                        MotionCommand::Travel(p)
                    } else {
                        MotionCommand::Draw(p)
                    }
                })
                .collect();
            Stroke { label, commands }
        })
}

proptest! {
    #[test]
    fn written_commands_parse_back(
        strokes in prop::collection::vec(stroke_strategy(), 0..8),
        markers in any::<bool>(),
    ) {
        let text = CommandWriter::new(markers).render(&strokes);
        let program = parse_str(&text);

        let expected: Vec<MotionCommand> =
            strokes.iter().flat_map(|s| s.commands.iter().copied()).collect();
        prop_assert_eq!(program.commands, expected);
        prop_assert!(program.skipped.is_empty());
        if markers {
            let labels: Vec<u32> = strokes.iter().map(|s| s.label).collect();
            prop_assert_eq!(program.markers, labels);
        } else {
            prop_assert!(program.markers.is_empty());
        }
    }

    #[test]
    fn arbitrary_lines_never_panic(lines in prop::collection::vec(".{0,40}", 0..30)) {
        let text = lines.join("\n");
        let program = parse_str(&text);
        prop_assert!(program.commands.len() + program.markers.len() + program.skipped.len()
            <= lines.len().max(1));
    }
}
