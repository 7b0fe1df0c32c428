use archviz_editor::{
    EditorSettings, LoadTracker, MIN_WALL_HEIGHT, NOTICE_CAPACITY, NoticeLog, PlacementOutcome,
    PlacementState, WallPlacement,
};
use archviz_geometry::{DEFAULT_ANGLE_STEP, DEFAULT_GRID_STEP, PlanePoint};
use archviz_scene::FurnitureKind;
use std::f64::consts::PI;

const EPS: f64 = 1.0e-9;

fn at(x: f64, z: f64) -> Option<PlanePoint> {
    Some(PlanePoint::new(x, z))
}

fn click(placement: &mut WallPlacement, x: f64, z: f64) -> PlacementOutcome {
    placement.click(at(x, z), DEFAULT_GRID_STEP, DEFAULT_ANGLE_STEP)
}

#[test]
fn toggle_switches_between_idle_and_first_point() {
    let mut placement = WallPlacement::new();
    assert_eq!(placement.state(), PlacementState::Idle);
    assert!(placement.toggle());
    assert_eq!(placement.state(), PlacementState::AwaitingFirstPoint);
    assert!(!placement.toggle());
    assert_eq!(placement.state(), PlacementState::Idle);
}

#[test]
fn first_click_captures_snapped_point() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);

    let outcome = click(&mut placement, 0.4, -1.6);
    assert_eq!(outcome, PlacementOutcome::Started(PlanePoint::new(0.0, -2.0)));
    assert_eq!(placement.captured_point(), at(0.0, -2.0));
}

#[test]
fn second_click_commits_and_restarts_without_chaining() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);
    click(&mut placement, 0.0, 0.0);

    let PlacementOutcome::Committed(draft) = click(&mut placement, 3.2, 0.1) else {
        panic!("expected a committed wall");
    };
    assert!((draft.length - 3.0).abs() < EPS);
    assert!(draft.yaw.abs() < EPS);
    assert_eq!(draft.center, PlanePoint::new(1.5, 0.0));

    assert_eq!(placement.state(), PlacementState::AwaitingFirstPoint);
    assert_eq!(placement.captured_point(), None);
    assert_eq!(placement.preview(), None);
}

#[test]
fn committed_yaw_is_a_multiple_of_fifteen_degrees() {
    let ends = [(2.0, 1.0), (-3.0, 4.0), (1.0, -5.0), (-2.0, -2.0), (0.0, 7.0)];
    for (x, z) in ends {
        let mut placement = WallPlacement::new();
        placement.set_active(true);
        click(&mut placement, 0.0, 0.0);
        let PlacementOutcome::Committed(draft) = click(&mut placement, x, z) else {
            panic!("expected a committed wall for ({x}, {z})");
        };
        let steps = draft.yaw / (PI / 12.0);
        assert!((steps - steps.round()).abs() < 1.0e-6, "yaw {} for ({x}, {z})", draft.yaw);
        assert!((draft.length - f64::hypot(x, z)).abs() < EPS);
    }
}

#[test]
fn coincident_points_keep_the_start() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);
    click(&mut placement, 1.0, 1.0);

    let outcome = click(&mut placement, 1.2, 0.9);
    assert_eq!(outcome, PlacementOutcome::Degenerate(PlanePoint::new(1.0, 1.0)));
    assert_eq!(placement.captured_point(), at(1.0, 1.0));
}

#[test]
fn off_ground_click_is_a_noop() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);
    let outcome = placement.click(None, DEFAULT_GRID_STEP, DEFAULT_ANGLE_STEP);
    assert_eq!(outcome, PlacementOutcome::Ignored);
    assert_eq!(placement.state(), PlacementState::AwaitingFirstPoint);
}

#[test]
fn idle_click_is_ignored() {
    let mut placement = WallPlacement::new();
    assert_eq!(click(&mut placement, 1.0, 1.0), PlacementOutcome::Ignored);
    assert_eq!(placement.captured_point(), None);
}

#[test]
fn preview_follows_pointer_and_hides_off_ground() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);

    placement.pointer_moved(at(2.0, 2.0), DEFAULT_GRID_STEP);
    assert_eq!(placement.preview(), None);

    click(&mut placement, 0.0, 0.0);
    placement.pointer_moved(at(2.4, 0.6), DEFAULT_GRID_STEP);
    assert_eq!(
        placement.preview(),
        Some((PlanePoint::new(0.0, 0.0), PlanePoint::new(2.0, 1.0)))
    );

    placement.pointer_moved(None, DEFAULT_GRID_STEP);
    assert_eq!(placement.preview(), None);
}

#[test]
fn turning_off_clears_captured_point_and_preview() {
    let mut placement = WallPlacement::new();
    placement.set_active(true);
    click(&mut placement, 0.0, 0.0);
    placement.pointer_moved(at(1.0, 0.0), DEFAULT_GRID_STEP);

    placement.set_active(false);
    assert_eq!(placement.state(), PlacementState::Idle);
    assert_eq!(placement.captured_point(), None);
    assert_eq!(placement.preview(), None);
}

#[test]
fn height_is_clamped_and_nan_rejected() {
    let mut settings = EditorSettings::default();
    assert_eq!(settings.wall_height, 3.0);

    assert!(settings.set_wall_height(f64::NAN).is_err());
    assert_eq!(settings.wall_height, 3.0);

    assert_eq!(settings.set_wall_height(0.01).ok(), Some(MIN_WALL_HEIGHT));
    assert!(EditorSettings::parse_wall_height("tall").is_err());
    assert!(EditorSettings::parse_wall_height("inf").is_err());
    assert_eq!(EditorSettings::parse_wall_height(" 4.5 ").ok(), Some(4.5));
}

#[test]
fn settings_validation_rejects_bad_steps() {
    let settings = EditorSettings {
        grid_step: 0.0,
        ..EditorSettings::default()
    };
    assert!(settings.validated().is_err());

    let settings = EditorSettings {
        wall_height: -2.0,
        ..EditorSettings::default()
    };
    assert_eq!(settings.validated().ok().map(|s| s.wall_height), Some(MIN_WALL_HEIGHT));
}

#[test]
fn only_latest_load_token_resolves() {
    let mut tracker = LoadTracker::new();
    let first = tracker.request(FurnitureKind::Sofa, 0);
    let second = tracker.request(FurnitureKind::Lamp, 0);
    assert!(second.token > first.token);

    assert_eq!(tracker.resolve(first.token), None);
    assert_eq!(tracker.resolve(second.token), Some(second));
    assert_eq!(tracker.resolve(second.token), None);
}

#[test]
fn notice_log_keeps_newest_entries() {
    let mut log = NoticeLog::new();
    for index in 0..NOTICE_CAPACITY + 50 {
        log.info(format!("notice {index}"));
    }
    assert_eq!(log.len(), NOTICE_CAPACITY);
    assert_eq!(log.iter().next().map(|n| n.message.as_str()), Some("notice 50"));
}
