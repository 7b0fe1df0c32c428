use std::f64::consts::PI;

use crate::Point3;

/// Linear grid step in scene units.
pub const DEFAULT_GRID_STEP: f64 = 1.0;
/// Orientation step, 15 degrees.
pub const DEFAULT_ANGLE_STEP: f64 = PI / 12.0;

/// Nearest multiple of `step`. Ties round toward positive infinity.
///
/// `step` must be strictly positive.
pub fn snap_linear(value: f64, step: f64) -> f64 {
    debug_assert!(step > 0.0, "snap step must be positive");
    (value / step + 0.5).floor() * step
}

/// Nearest multiple of `step` for an angle in radians.
///
/// Inputs come from `atan2` or a gizmo ring, so no wrap-around at 2π is applied.
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    debug_assert!(step > 0.0, "snap step must be positive");
    (angle / step + 0.5).floor() * step
}

/// A point on the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanePoint {
    pub x: f64,
    pub z: f64,
}

impl PlanePoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn from_point(point: Point3) -> Self {
        Self::new(point.x, point.z)
    }

    pub fn snapped(self, step: f64) -> Self {
        Self::new(snap_linear(self.x, step), snap_linear(self.z, step))
    }

    pub fn to_point(self, height: f64) -> Point3 {
        Point3::new(self.x, height, self.z)
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.z + other.z) * 0.5)
    }

    /// Heading from `self` toward `other`, measured from +X toward +Z.
    pub fn heading_to(self, other: Self) -> f64 {
        (other.z - self.z).atan2(other.x - self.x)
    }
}
