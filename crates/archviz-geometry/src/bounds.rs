
use crate::{Matrix4, Point3, Vector3, transform_point};

/// Corner pairs of a box, indexed like [`Aabb::corners`].
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Box faces wound counter-clockwise when seen from outside.
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 7, 6, 2],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box centred on the origin.
    pub fn centered(size: Vector3) -> Self {
        let half = size * 0.5;
        Self::new(
            Point3::new(-half.x, -half.y, -half.z),
            Point3::new(half.x, half.y, half.z),
        )
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for point in iter {
            bounds = bounds.including(point);
        }
        Some(bounds)
    }

    pub fn including(self, point: Point3) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            max: Point3::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        }
    }

    pub fn union(self, other: Self) -> Self {
        self.including(other.min).including(other.max)
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Point3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ]
    }

    /// The twelve edges after mapping the corners through `matrix`.
    pub fn edges(&self, matrix: &Matrix4) -> Vec<[Point3; 2]> {
        let corners = self.corners().map(|corner| transform_point(matrix, corner));
        BOX_EDGES
            .iter()
            .map(|edge| [corners[edge[0]], corners[edge[1]]])
            .collect()
    }

    /// The six faces after mapping the corners through `matrix`.
    pub fn faces(&self, matrix: &Matrix4) -> Vec<[Point3; 4]> {
        let corners = self.corners().map(|corner| transform_point(matrix, corner));
        BOX_FACES
            .iter()
            .map(|face| face.map(|idx| corners[idx]))
            .collect()
    }

    /// World-aligned box around this box after `matrix`.
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        let corners = self.corners().map(|corner| transform_point(matrix, corner));
        let mut bounds = Self::new(corners[0], corners[0]);
        for corner in &corners[1..] {
            bounds = bounds.including(*corner);
        }
        bounds
    }
}
