use archviz_base::{Guid, LengthUnit};
use archviz_geometry::{Aabb, Matrix4, PlanePoint, Point3, Transform, Vector3};

pub const DEFAULT_WALL_THICKNESS: f64 = 0.1;

/// An oriented box standing on the ground.
///
/// `height` is the geometry height at creation time. Editing the global
/// height afterwards moves labels but never resizes existing walls.
#[derive(Clone, Debug)]
pub struct Wall {
    pub guid: Guid,
    pub name: String,
    pub length: f64,
    pub height: f64,
    pub thickness: f64,
    pub transform: Transform,
}

impl Wall {
    pub fn new(length: f64, height: f64, thickness: f64, center: PlanePoint, yaw: f64) -> Self {
        let translation = Point3::new(center.x, height * 0.5, center.z);
        Self {
            guid: Guid::new(),
            name: "Wall".to_string(),
            length,
            height,
            thickness,
            transform: Transform::from_translation(translation).with_yaw(yaw),
        }
    }

    pub fn position(&self) -> Point3 {
        self.transform.translation
    }

    pub fn yaw(&self) -> f64 {
        self.transform.yaw()
    }

    pub fn local_bounds(&self) -> Aabb {
        Aabb::centered(Vector3::new(self.length, self.height, self.thickness))
    }

    pub fn world_matrix(&self) -> Matrix4 {
        self.transform.matrix()
    }
}

/// Text billboard showing a wall's length.
#[derive(Clone, Debug, PartialEq)]
pub struct WallLabel {
    pub text: String,
    pub position: Point3,
}

impl WallLabel {
    pub fn for_length(length: f64, unit: LengthUnit) -> Self {
        Self {
            text: unit.format(length),
            position: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

/// A wall together with the one label it owns.
#[derive(Clone, Debug)]
pub struct PlacedWall {
    pub wall: Wall,
    pub label: WallLabel,
}
