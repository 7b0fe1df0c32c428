mod furniture;
mod scene;
mod wall;

pub use furniture::{FurnitureInstance, FurnitureKind, MeshPart, ModelAsset};
pub use scene::{EntityRef, PickHit, Scene};
pub use wall::{DEFAULT_WALL_THICKNESS, PlacedWall, Wall, WallLabel};
