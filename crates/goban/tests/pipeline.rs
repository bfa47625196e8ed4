mod common;

use common::*;
use goban::core::StoneColor;
use goban::grid::SizeTier;
use goban::{BoardRecognizer, RecognitionWarning, RecognizeError, RecognizerParams};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn recognizes_synthetic_board_with_watershed() {
    init_logger();
    let det = detections();
    let recognizer =
        BoardRecognizer::new(RecognizerParams::default(), &det, &det).expect("recognizer");

    let rec = recognizer.recognize(&board_channels()).expect("recognition");

    let model = rec.calibration.model;
    assert_eq!(model.size(), 9);
    assert_eq!(rec.calibration.size_estimate.tier, SizeTier::ExactBoth);
    approx::assert_relative_eq!(model.spacing().x, SPACING, epsilon = 1e-3);

    let black: Vec<_> = rec.state.black().keys().copied().collect();
    let white: Vec<_> = rec.state.white().keys().copied().collect();
    assert_eq!(black, vec![pos(3, 3), pos(4, 3), pos(7, 8)]);
    assert_eq!(white, vec![pos(5, 5), pos(2, 7)]);

    for stone in rec.state.iter() {
        assert!(stone.radius > 12.0 && stone.radius <= 20.0, "{stone:?}");
    }

    assert!(rec.warnings.contains(&RecognitionWarning::SeedUnresolved {
        color: StoneColor::Black,
        count: 1
    }));
    assert!(rec.warnings.contains(&RecognitionWarning::OversizedRegion {
        color: StoneColor::Black,
        count: 1
    }));
    assert_eq!(rec.inference.conflicts_resolved, 0);
    assert!(rec.artifacts.is_none());
}

#[test]
fn raw_circles_mode_resolves_color_conflicts() {
    init_logger();
    let det = detections();
    let params = RecognizerParams {
        use_watershed: false,
        keep_artifacts: true,
        ..RecognizerParams::default()
    };
    let recognizer = BoardRecognizer::new(params, &det, &det).expect("recognizer");

    let rec = recognizer.recognize(&board_channels()).expect("recognition");

    // the false black circle on (5, 5) loses to the white stone
    assert_eq!(rec.inference.conflicts_resolved, 1);
    assert_eq!(rec.state.black().len(), 3);
    assert_eq!(
        rec.state.stone_at(pos(5, 5)).map(|s| s.color),
        Some(StoneColor::White)
    );

    let artifacts = rec.artifacts.expect("artifacts");
    assert!(artifacts.disk_masks.iter().all(Option::is_none));
    let (x, y) = pixel(3, 3);
    assert_eq!(artifacts.masks[0].get(x as i64, y as i64), Some(255));
    assert_eq!(artifacts.masks[1].get(x as i64, y as i64), Some(0));
}

#[test]
fn pixel_lookup_finds_recognized_stones() {
    let det = detections();
    let recognizer =
        BoardRecognizer::new(RecognizerParams::default(), &det, &det).expect("recognizer");
    let rec = recognizer.recognize(&board_channels()).expect("recognition");

    let (x, y) = pixel(7, 8);
    let hit = rec
        .state
        .stone_at_pixel(nalgebra::Point2::new(x + 5.0, y - 5.0))
        .expect("stone");
    assert_eq!(hit.position, pos(7, 8));
    assert!(rec.state.stone_at_pixel(nalgebra::Point2::new(5.0, 5.0)).is_none());
}

#[test]
fn too_few_lines_fall_back_to_default_size() {
    let mut det = detections();
    det.segments = grid_segments(5);
    let recognizer =
        BoardRecognizer::new(RecognizerParams::default(), &det, &det).expect("recognizer");

    let rec = recognizer.recognize(&board_channels()).expect("recognition");
    assert_eq!(rec.calibration.model.size(), 19);
    assert!(matches!(
        rec.warnings.first(),
        Some(RecognitionWarning::SizeAmbiguous {
            horizontal: 5,
            vertical: 5,
            size: 19
        })
    ));
}

#[test]
fn diagonal_only_detections_fail_calibration() {
    let mut det = detections();
    det.segments.retain(|s| s.orientation(3.0) == goban::core::Orientation::Diagonal);
    let recognizer =
        BoardRecognizer::new(RecognizerParams::default(), &det, &det).expect("recognizer");
    assert!(matches!(
        recognizer.recognize(&board_channels()),
        Err(RecognizeError::Calibration(_))
    ));
}
