use archviz_base::Guid;
use archviz_geometry::Point3;
use archviz_scene::{EntityRef, Scene};

/// The single active entity, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    None,
    Wall(Guid),
    Furniture(Guid),
}

impl Selection {
    pub fn entity(&self) -> Option<EntityRef> {
        match *self {
            Self::None => None,
            Self::Wall(guid) => Some(EntityRef::Wall(guid)),
            Self::Furniture(guid) => Some(EntityRef::Furniture(guid)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<EntityRef> for Selection {
    fn from(entity: EntityRef) -> Self {
        match entity {
            EntityRef::Wall(guid) => Self::Wall(guid),
            EntityRef::Furniture(guid) => Self::Furniture(guid),
        }
    }
}

/// Wireframe copy of the selected geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub owner: EntityRef,
    pub segments: Vec<[Point3; 2]>,
}

impl Outline {
    pub fn build(scene: &Scene, owner: EntityRef) -> Self {
        Self {
            owner,
            segments: scene.entity_edges(owner),
        }
    }
}

/// Selection plus the visuals derived from it.
///
/// The gizmo follows the selection, so it can never point at a different
/// entity. `epoch` counts selection changes.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selection: Selection,
    outline: Option<Outline>,
    epoch: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    pub fn gizmo_target(&self) -> Option<EntityRef> {
        self.selection.entity()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replaces the selection and rebuilds the outline from scratch.
    ///
    /// Returns `false` when `entity` is not in the scene; the selection is
    /// left unchanged in that case.
    pub fn select(&mut self, scene: &Scene, entity: EntityRef) -> bool {
        if !scene.contains(entity) {
            return false;
        }
        let selection = Selection::from(entity);
        if self.selection != selection {
            self.epoch += 1;
        }
        self.selection = selection;
        self.outline = Some(Outline::build(scene, entity));
        true
    }

    /// Drops the selection and outline. The epoch only advances when
    /// something was actually selected.
    pub fn clear(&mut self) {
        if !self.selection.is_none() {
            self.epoch += 1;
        }
        self.selection = Selection::None;
        self.outline = None;
    }

    pub fn refresh_outline(&mut self, scene: &Scene) {
        self.outline = self
            .selection
            .entity()
            .filter(|entity| scene.contains(*entity))
            .map(|entity| Outline::build(scene, entity));
    }
}
