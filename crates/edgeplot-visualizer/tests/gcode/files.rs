use edgeplot_core::{MotionCommand, Point, Stroke};
use edgeplot_visualizer::{
    write_atomic, CommandParser, CommandWriter, PlaybackStats, SkipReason, SvgPreview,
    ToolpathPlayer, VisualizerError,
};
use std::fs;
use tempfile::TempDir;

fn strokes() -> Vec<Stroke> {
    vec![
        Stroke {
            label: 0,
            commands: vec![
                MotionCommand::Travel(Point::new(0, 0)),
                MotionCommand::Draw(Point::new(1, 1)),
            ],
        },
        Stroke {
            label: 1,
            commands: vec![MotionCommand::Travel(Point::new(40, 2))],
        },
    ]
}

#[test]
fn test_write_then_read_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.gcode");

    CommandWriter::default().write_file(&path, &strokes()).unwrap();
    let program = CommandParser::new().read_file(&path).unwrap();

    assert_eq!(program.commands.len(), 3);
    assert_eq!(program.markers, vec![0, 1]);
    assert!(program.skipped.is_empty());
}

#[test]
fn test_atomic_write_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.gcode");
    fs::write(&path, "G0 X9 Y9\nG1 X8 Y8\nG1 X7 Y7\n").unwrap();

    CommandWriter::new(false).write_file(&path, &strokes()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "G0 X0 Y0\nG1 X1 Y1\nG0 X40 Y2\n"
    );
    // Only the target remains, no temporary siblings
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_empty_toolpath_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.gcode");
    CommandWriter::default().write_file(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.gcode");
    let err = write_atomic(&path, b"G0 X0 Y0\n").unwrap_err();
    assert!(matches!(err, VisualizerError::IoError(_)));
    assert!(!path.exists());
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = CommandParser::new()
        .read_file(dir.path().join("nope.gcode"))
        .unwrap_err();
    assert!(matches!(err, VisualizerError::IoError(_)));
}

#[test]
fn test_replay_foreign_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("foreign.gcode");
    let svg = dir.path().join("preview.svg");
    fs::write(
        &input,
        "; header\nG21\nG0 X0 Y0\nG1 X3.2 Y3.9\nG1 X3 Y0\nM5\nG0 X10 Y10\n",
    )
    .unwrap();

    let program = CommandParser::new().read_file(&input).unwrap();
    assert_eq!(program.commands.len(), 4);
    assert_eq!(program.skipped.len(), 3);
    assert!(program
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::Unrecognized));

    let mut player = ToolpathPlayer::new((PlaybackStats::new(), SvgPreview::new(true)));
    player.play(&program.commands);
    let (stats, preview) = player.into_sink();

    assert_eq!(stats.draw_moves, 2);
    assert_eq!(stats.travel_moves, 2);
    assert!((stats.draw_distance - 9.0).abs() < 1e-9);
    assert_eq!(preview.draw_path(), "M 0 0 L 3 4 L 3 0");

    preview.write_file(&svg).unwrap();
    let document = fs::read_to_string(&svg).unwrap();
    assert!(document.contains("M 0 0 L 3 4 L 3 0"));
    assert!(document.contains("M 3 0 L 10 10"));
}
