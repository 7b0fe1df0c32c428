use archviz_geometry::{DEFAULT_ANGLE_STEP, PlanePoint, snap_angle, snap_linear};
use std::f64::consts::PI;

#[test]
fn linear_snap_rounds_to_nearest_step() {
    assert_eq!(snap_linear(2.3, 1.0), 2.0);
    assert_eq!(snap_linear(1.7, 1.0), 2.0);
    assert_eq!(snap_linear(-1.2, 1.0), -1.0);
    assert!((snap_linear(0.74, 0.5) - 0.5).abs() < 1.0e-12);
    assert!((snap_linear(0.76, 0.5) - 1.0).abs() < 1.0e-12);
}

#[test]
fn linear_snap_ties_round_up() {
    assert_eq!(snap_linear(0.5, 1.0), 1.0);
    assert_eq!(snap_linear(-0.5, 1.0), 0.0);
    assert_eq!(snap_linear(-1.5, 1.0), -1.0);
}

#[test]
fn linear_snap_is_idempotent() {
    let steps = [0.1, 0.25, 1.0, 3.0];
    let values = [-17.33, -2.5, -0.04, 0.0, 0.05, 1.49, 7.77, 123.456];
    for step in steps {
        for value in values {
            let once = snap_linear(value, step);
            assert_eq!(snap_linear(once, step), once, "value {value} step {step}");
        }
    }
}

#[test]
fn angle_snap_lands_on_fifteen_degrees() {
    let snapped = snap_angle(0.3, DEFAULT_ANGLE_STEP);
    assert!((snapped - PI / 12.0).abs() < 1.0e-12);

    let snapped = snap_angle(-3.0, DEFAULT_ANGLE_STEP);
    let steps = snapped / DEFAULT_ANGLE_STEP;
    assert!((steps - steps.round()).abs() < 1.0e-9);
    assert!((snapped + 11.0 * PI / 12.0).abs() < 1.0e-12);
}

#[test]
fn plane_point_snaps_both_axes() {
    let point = PlanePoint::new(2.4, -0.6).snapped(1.0);
    assert_eq!(point, PlanePoint::new(2.0, -1.0));
}
