use anyhow::Result;
use archviz_io::{GLB_MAGIC, load_furniture, load_model, model_path, parse_model};
use archviz_scene::FurnitureKind;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_nanos(),
        Err(_) => 0,
    };
    path.push(format!("archviz_{stamp}_{file_name}"));
    path
}

fn chair_document() -> serde_json::Value {
    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "Chair", "children": [1, 2], "translation": [0.0, 0.0, 0.0] },
            { "name": "Seat", "mesh": 0, "translation": [0.0, 0.25, 0.0] },
            { "name": "Back", "mesh": 1, "translation": [0.0, 1.0, -0.45], "scale": [1.0, 2.0, 1.0] }
        ],
        "meshes": [
            { "name": "seat", "primitives": [{ "attributes": { "POSITION": 0 } }] },
            { "primitives": [{ "attributes": { "POSITION": 1, "NORMAL": 2 } }] }
        ],
        "accessors": [
            { "count": 8, "min": [-0.5, -0.25, -0.5], "max": [0.5, 0.25, 0.5] },
            { "count": 8, "min": [-0.5, -0.25, -0.05], "max": [0.5, 0.25, 0.05] },
            { "count": 8 }
        ]
    })
}

fn glb_bytes(document: &serde_json::Value) -> Vec<u8> {
    let mut json = serde_json::to_vec(document).unwrap_or_default();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let total = 12 + 8 + json.len();
    let mut bytes = Vec::with_capacity(total);
    bytes.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&2u32.to_le_bytes());
    bytes.extend_from_slice(&(total as u32).to_le_bytes());
    bytes.extend_from_slice(&(json.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"JSON");
    bytes.extend_from_slice(&json);
    bytes
}

#[test]
fn model_path_follows_asset_contract() {
    let path = model_path("models", FurnitureKind::Sofa2);
    assert_eq!(path, Path::new("models").join("Sofa_2.glb"));
}

#[test]
fn glb_parts_carry_node_transforms() -> Result<()> {
    let asset = parse_model(&glb_bytes(&chair_document()))?;
    assert_eq!(asset.parts.len(), 2);
    assert_eq!(asset.parts[0].name, "seat");
    assert_eq!(asset.parts[1].name, "Back");

    let bounds = asset.bounds().expect("bounds");
    assert!((bounds.min.y - 0.0).abs() < 1.0e-9);
    assert!((bounds.max.y - 1.5).abs() < 1.0e-9);
    assert!((bounds.min.z + 0.5).abs() < 1.0e-9);
    Ok(())
}

#[test]
fn plain_gltf_json_is_accepted() -> Result<()> {
    let bytes = serde_json::to_vec(&chair_document())?;
    let asset = parse_model(&bytes)?;
    assert_eq!(asset.parts.len(), 2);
    Ok(())
}

#[test]
fn truncated_glb_is_an_error() {
    let mut bytes = glb_bytes(&chair_document());
    bytes.truncate(30);
    assert!(parse_model(&bytes).is_err());
}

#[test]
fn missing_accessor_bounds_is_an_error() {
    let document = json!({
        "nodes": [{ "mesh": 0 }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "accessors": [{ "count": 3 }]
    });
    assert!(parse_model(&glb_bytes(&document)).is_err());
}

#[test]
fn load_model_reads_file_and_names_asset() -> Result<()> {
    let path = temp_path("Chair.glb");
    fs::write(&path, glb_bytes(&chair_document()))?;

    let asset = load_model(&path)?;
    assert!(asset.name.ends_with("Chair"));
    assert_eq!(asset.parts.len(), 2);

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn load_furniture_resolves_from_models_dir() -> Result<()> {
    let dir = temp_path("models");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("Lamp.glb"), glb_bytes(&chair_document()))?;

    let asset = load_furniture(&dir, FurnitureKind::Lamp)?;
    assert_eq!(asset.name, "Lamp");

    assert!(load_furniture(&dir, FurnitureKind::Bed).is_err());

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}
