//! f64 geometry shared by the scene, the editor core and the viewer.
//!
//! Y is up; the ground plane is the XZ plane.

mod bounds;
mod ray;
mod snap;
mod transform;

pub use cgmath::{Deg, EuclideanSpace, InnerSpace, Rad};

pub type Point3 = cgmath::Point3<f64>;
pub type Vector3 = cgmath::Vector3<f64>;
pub type Matrix4 = cgmath::Matrix4<f64>;
pub type Quaternion = cgmath::Quaternion<f64>;

pub use bounds::{Aabb, BOX_EDGES, BOX_FACES};
pub use ray::{Ray, ray_aabb_interval, ray_box_hit, ray_plane_y};
pub use snap::{DEFAULT_ANGLE_STEP, DEFAULT_GRID_STEP, PlanePoint, snap_angle, snap_linear};
pub use transform::{Transform, transform_point, transform_vector};
