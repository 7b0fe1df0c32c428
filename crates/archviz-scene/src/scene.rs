use archviz_base::Guid;
use archviz_geometry::{Point3, Ray, Transform, ray_box_hit};

use crate::{FurnitureInstance, PlacedWall, Wall, WallLabel};

/// A selectable object in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Wall(Guid),
    Furniture(Guid),
}

impl EntityRef {
    pub fn guid(&self) -> Guid {
        match self {
            Self::Wall(guid) | Self::Furniture(guid) => *guid,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Wall(_) => "Wall",
            Self::Furniture(_) => "Furniture",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub entity: EntityRef,
    pub distance: f64,
    pub point: Point3,
}

/// Walls (each with its label) and furniture instances.
///
/// Nothing is ever removed; the scene lives until the editor is dropped.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    walls: Vec<PlacedWall>,
    furniture: Vec<FurnitureInstance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wall(&mut self, wall: Wall, label: WallLabel) -> Guid {
        let guid = wall.guid;
        self.walls.push(PlacedWall { wall, label });
        guid
    }

    pub fn add_furniture(&mut self, instance: FurnitureInstance) -> Guid {
        let guid = instance.guid;
        self.furniture.push(instance);
        guid
    }

    pub fn walls(&self) -> &[PlacedWall] {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut [PlacedWall] {
        &mut self.walls
    }

    pub fn furniture(&self) -> &[FurnitureInstance] {
        &self.furniture
    }

    pub fn wall(&self, guid: Guid) -> Option<&PlacedWall> {
        self.walls.iter().find(|placed| placed.wall.guid == guid)
    }

    pub fn wall_mut(&mut self, guid: Guid) -> Option<&mut PlacedWall> {
        self.walls.iter_mut().find(|placed| placed.wall.guid == guid)
    }

    pub fn furniture_item(&self, guid: Guid) -> Option<&FurnitureInstance> {
        self.furniture.iter().find(|item| item.guid == guid)
    }

    pub fn furniture_mut(&mut self, guid: Guid) -> Option<&mut FurnitureInstance> {
        self.furniture.iter_mut().find(|item| item.guid == guid)
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Wall(guid) => self.wall(guid).is_some(),
            EntityRef::Furniture(guid) => self.furniture_item(guid).is_some(),
        }
    }

    pub fn transform_of(&self, entity: EntityRef) -> Option<Transform> {
        match entity {
            EntityRef::Wall(guid) => self.wall(guid).map(|placed| placed.wall.transform),
            EntityRef::Furniture(guid) => self.furniture_item(guid).map(|item| item.transform),
        }
    }

    pub fn set_transform(&mut self, entity: EntityRef, transform: Transform) -> bool {
        match entity {
            EntityRef::Wall(guid) => match self.wall_mut(guid) {
                Some(placed) => {
                    placed.wall.transform = transform;
                    true
                }
                None => false,
            },
            EntityRef::Furniture(guid) => match self.furniture_mut(guid) {
                Some(item) => {
                    item.transform = transform;
                    true
                }
                None => false,
            },
        }
    }

    /// Nearest wall or furniture hit along `ray`.
    ///
    /// A hit on any mesh part of a model resolves to the model itself.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let mut best: Option<PickHit> = None;
        let mut consider = |entity: EntityRef, distance: f64| match best {
            Some(current) if distance >= current.distance => {}
            _ => {
                best = Some(PickHit {
                    entity,
                    distance,
                    point: ray.at(distance),
                })
            }
        };

        for placed in &self.walls {
            let wall = &placed.wall;
            if let Some(t) = ray_box_hit(ray, &wall.local_bounds(), &wall.world_matrix()) {
                consider(EntityRef::Wall(wall.guid), t);
            }
        }

        for item in &self.furniture {
            for part in &item.parts {
                if let Some(t) = ray_box_hit(ray, &part.bounds, &item.part_matrix(part)) {
                    consider(EntityRef::Furniture(item.guid), t);
                }
            }
        }

        best
    }

    /// World-space wireframe of an entity's geometry.
    pub fn entity_edges(&self, entity: EntityRef) -> Vec<[Point3; 2]> {
        match entity {
            EntityRef::Wall(guid) => self
                .wall(guid)
                .map(|placed| placed.wall.local_bounds().edges(&placed.wall.world_matrix()))
                .unwrap_or_default(),
            EntityRef::Furniture(guid) => self
                .furniture_item(guid)
                .map(|item| {
                    item.parts
                        .iter()
                        .flat_map(|part| part.bounds.edges(&item.part_matrix(part)))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
