use archviz_base::{Error, Guid};
use archviz_geometry::{Aabb, Matrix4, Transform};

/// The fixed catalogue offered by the toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    #[default]
    Sofa,
    Sofa2,
    Chair,
    Cupboard,
    Bed,
    Tv,
    Lamp,
}

impl FurnitureKind {
    pub const ALL: [Self; 7] = [
        Self::Sofa,
        Self::Sofa2,
        Self::Chair,
        Self::Cupboard,
        Self::Bed,
        Self::Tv,
        Self::Lamp,
    ];

    /// Display name, also the asset file stem.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sofa => "Sofa",
            Self::Sofa2 => "Sofa_2",
            Self::Chair => "Chair",
            Self::Cupboard => "Cupboard",
            Self::Bed => "Bed",
            Self::Tv => "TV",
            Self::Lamp => "Lamp",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.glb", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FurnitureKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_name(text).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
            Error::InvalidParameter(format!(
                "unknown furniture '{text}', expected one of {}",
                known.join(", ")
            ))
        })
    }
}

/// One mesh of a loaded model, kept as its bounding box in model space.
#[derive(Clone, Debug)]
pub struct MeshPart {
    pub name: String,
    pub bounds: Aabb,
    pub local: Matrix4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshPart {
    pub fn new(name: impl Into<String>, bounds: Aabb, local: Matrix4) -> Self {
        Self {
            name: name.into(),
            bounds,
            local,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// What the asset loader hands back for a furniture name.
#[derive(Clone, Debug, Default)]
pub struct ModelAsset {
    pub name: String,
    pub parts: Vec<MeshPart>,
}

impl ModelAsset {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.parts
            .iter()
            .map(|part| part.bounds.transformed(&part.local))
            .reduce(Aabb::union)
    }
}

#[derive(Clone, Debug)]
pub struct FurnitureInstance {
    pub guid: Guid,
    pub kind: FurnitureKind,
    pub transform: Transform,
    pub parts: Vec<MeshPart>,
}

impl FurnitureInstance {
    pub fn from_asset(kind: FurnitureKind, asset: ModelAsset) -> Self {
        Self {
            guid: Guid::new(),
            kind,
            transform: Transform::default(),
            parts: asset.parts,
        }
    }

    pub fn world_matrix(&self) -> Matrix4 {
        self.transform.matrix()
    }

    pub fn part_matrix(&self, part: &MeshPart) -> Matrix4 {
        self.world_matrix() * part.local
    }
}
