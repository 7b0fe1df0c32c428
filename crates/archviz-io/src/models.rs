use anyhow::{Context, Result, bail};
use archviz_scene::{FurnitureKind, ModelAsset};
use std::path::{Path, PathBuf};

use crate::gltf::parse_model;

pub const DEFAULT_MODELS_DIR: &str = "models";

/// `<models_dir>/<Name>.glb`
pub fn model_path(models_dir: impl AsRef<Path>, kind: FurnitureKind) -> PathBuf {
    models_dir.as_ref().join(kind.file_name())
}

pub fn load_model(path: impl AsRef<Path>) -> Result<ModelAsset> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read model file {}", path.display()))?;
    let mut asset =
        parse_model(&bytes).with_context(|| format!("parse model file {}", path.display()))?;
    if asset.is_empty() {
        bail!("model {} has no meshes", path.display());
    }
    if asset.name.is_empty() {
        asset.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(asset)
}

pub fn load_furniture(models_dir: impl AsRef<Path>, kind: FurnitureKind) -> Result<ModelAsset> {
    let path = model_path(models_dir, kind);
    let mut asset = load_model(&path).with_context(|| format!("load furniture {kind}"))?;
    asset.name = kind.name().to_string();
    Ok(asset)
}
