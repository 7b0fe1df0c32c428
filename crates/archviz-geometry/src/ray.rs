use cgmath::{InnerSpace, SquareMatrix};

use crate::{Aabb, Matrix4, Point3, Vector3, transform_point, transform_vector};

const RAY_EPSILON: f64 = 1.0e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: Point3, direction: Vector3) -> Option<Self> {
        let length = direction.magnitude();
        if !length.is_finite() || length <= RAY_EPSILON {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / length,
        })
    }

    /// Straight down onto the ground from above `(x, z)`.
    pub fn downward(x: f64, z: f64) -> Self {
        Self {
            origin: Point3::new(x, 100.0, z),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Slab test. Returns the entry/exit parameters clipped to `[0, max_t]`.
pub fn ray_aabb_interval(
    origin: Point3,
    dir: Vector3,
    bounds: &Aabb,
    max_t: f64,
) -> Option<(f64, f64)> {
    let mut tmin: f64 = 0.0;
    let mut tmax: f64 = max_t;

    let mut check_axis = |origin: f64, dir: f64, min: f64, max: f64| -> bool {
        if dir.abs() <= RAY_EPSILON {
            return origin >= min && origin <= max;
        }
        let inv = 1.0 / dir;
        let t1 = (min - origin) * inv;
        let t2 = (max - origin) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
        tmax >= tmin
    };

    if !check_axis(origin.x, dir.x, bounds.min.x, bounds.max.x) {
        return None;
    }
    if !check_axis(origin.y, dir.y, bounds.min.y, bounds.max.y) {
        return None;
    }
    if !check_axis(origin.z, dir.z, bounds.min.z, bounds.max.z) {
        return None;
    }
    if tmax < 0.0 {
        return None;
    }
    Some((tmin, tmax))
}

/// Hit distance of `ray` against a box given in the local space of `world`.
///
/// The ray is mapped into local space without renormalising, so the returned
/// parameter is measured along the world ray and comparable across objects.
/// A ray starting inside the box does not count as a hit.
pub fn ray_box_hit(ray: &Ray, local: &Aabb, world: &Matrix4) -> Option<f64> {
    let inverse = world.invert()?;
    let origin = transform_point(&inverse, ray.origin);
    let dir = transform_vector(&inverse, ray.direction);
    let (tmin, _) = ray_aabb_interval(origin, dir, local, f64::INFINITY)?;
    (tmin > RAY_EPSILON).then_some(tmin)
}

/// Intersection with the horizontal plane `y = height`, in front of the ray.
pub fn ray_plane_y(ray: &Ray, height: f64) -> Option<(f64, Point3)> {
    if ray.direction.y.abs() <= RAY_EPSILON {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    if t <= 0.0 {
        return None;
    }
    let mut point = ray.at(t);
    point.y = height;
    Some((t, point))
}
