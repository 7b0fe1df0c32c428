use archviz_geometry::{Transform, Vector3, snap_angle, snap_linear};
use archviz_scene::EntityRef;

const MIN_SCALE: f64 = 0.01;

/// Global manipulation mode, shared by every selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    pub const ALL: [Self; 3] = [Self::Translate, Self::Rotate, Self::Scale];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Translate => "Move",
            Self::Rotate => "Rotate",
            Self::Scale => "Scale",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub fn unit(self) -> Vector3 {
        match self {
            Self::X => Vector3::new(1.0, 0.0, 0.0),
            Self::Y => Vector3::new(0.0, 1.0, 0.0),
            Self::Z => Vector3::new(0.0, 0.0, 1.0),
        }
    }

    fn component(self, vector: &mut Vector3) -> &mut f64 {
        match self {
            Self::X => &mut vector.x,
            Self::Y => &mut vector.y,
            Self::Z => &mut vector.z,
        }
    }
}

/// One handle drag, measured against the transform at drag start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoDrag {
    pub entity: EntityRef,
    pub mode: TransformMode,
    pub axis: GizmoAxis,
    pub origin: Transform,
}

impl GizmoDrag {
    /// Proposed transform after moving the handle by `amount`.
    ///
    /// Translate: scene units along the axis. Rotate: radians about the axis.
    /// Scale: relative growth, so `0.5` makes the axis 1.5 times longer.
    pub fn apply(&self, amount: f64) -> Transform {
        let mut transform = self.origin;
        match self.mode {
            TransformMode::Translate => {
                transform.translation = transform.translation + self.axis.unit() * amount;
            }
            TransformMode::Rotate => {
                *self.axis.component(&mut transform.rotation) += amount;
            }
            TransformMode::Scale => {
                let factor = (1.0 + amount).max(MIN_SCALE);
                let scale = self.axis.component(&mut transform.scale);
                *scale = (*scale * factor).max(MIN_SCALE);
            }
        }
        transform
    }
}

/// Puts a wall back on the ground grid: both horizontal position axes and
/// its yaw are snapped. Height, tilt and scale pass through.
pub fn constrain_wall_transform(transform: Transform, grid_step: f64, angle_step: f64) -> Transform {
    let mut snapped = transform;
    snapped.translation.x = snap_linear(transform.translation.x, grid_step);
    snapped.translation.z = snap_linear(transform.translation.z, grid_step);
    snapped.rotation.y = snap_angle(transform.rotation.y, angle_step);
    snapped
}
