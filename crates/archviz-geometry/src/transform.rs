use cgmath::{EuclideanSpace, Rad};

use crate::{Matrix4, Point3, Vector3};

/// Translation, Euler rotation (radians) and scale of a placed object.
///
/// `rotation.y` is the yaw: a positive yaw turns local +X toward world +Z,
/// which matches `atan2(dz, dx)` of a segment drawn on the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Point3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Point3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Point3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.rotation.y = yaw;
        self
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }

    pub fn matrix(&self) -> Matrix4 {
        Matrix4::from_translation(self.translation.to_vec())
            * Matrix4::from_angle_y(Rad(-self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn is_finite(&self) -> bool {
        let t = self.translation;
        let r = self.rotation;
        let s = self.scale;
        [t.x, t.y, t.z, r.x, r.y, r.z, s.x, s.y, s.z]
            .iter()
            .all(|value| value.is_finite())
    }
}

pub fn transform_point(matrix: &Matrix4, point: Point3) -> Point3 {
    use cgmath::Transform as _;
    matrix.transform_point(point)
}

pub fn transform_vector(matrix: &Matrix4, vector: Vector3) -> Vector3 {
    use cgmath::Transform as _;
    matrix.transform_vector(vector)
}
