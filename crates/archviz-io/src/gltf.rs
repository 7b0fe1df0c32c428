//! Minimal glTF 2.0 reader.
//!
//! Only the JSON document is interpreted: the node hierarchy and the
//! `POSITION` accessor bounds, which glTF requires to be present. Vertex
//! buffers are never decoded.

use archviz_base::{Error, Result};
use archviz_geometry::{Aabb, Matrix4, Point3, Quaternion, Vector3};
use archviz_scene::{MeshPart, ModelAsset};
use serde::Deserialize;
use std::collections::BTreeMap;

/// `glTF` in little endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_JSON: u32 = 0x4E4F_534A;

#[derive(Debug, Default, Deserialize)]
struct Document {
    scene: Option<usize>,
    #[serde(default)]
    scenes: Vec<SceneDef>,
    #[serde(default)]
    nodes: Vec<NodeDef>,
    #[serde(default)]
    meshes: Vec<MeshDef>,
    #[serde(default)]
    accessors: Vec<AccessorDef>,
}

#[derive(Debug, Default, Deserialize)]
struct SceneDef {
    #[serde(default)]
    nodes: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct NodeDef {
    name: Option<String>,
    #[serde(default)]
    children: Vec<usize>,
    mesh: Option<usize>,
    matrix: Option<[f64; 16]>,
    translation: Option<[f64; 3]>,
    rotation: Option<[f64; 4]>,
    scale: Option<[f64; 3]>,
}

#[derive(Debug, Default, Deserialize)]
struct MeshDef {
    name: Option<String>,
    #[serde(default)]
    primitives: Vec<PrimitiveDef>,
}

#[derive(Debug, Default, Deserialize)]
struct PrimitiveDef {
    #[serde(default)]
    attributes: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessorDef {
    min: Option<Vec<f64>>,
    max: Option<Vec<f64>>,
}

/// Parses a binary `.glb` container or a plain `.gltf` JSON document.
pub fn parse_model(bytes: &[u8]) -> Result<ModelAsset> {
    let json = if bytes.starts_with(b"glTF") {
        glb_json_chunk(bytes)?
    } else {
        bytes
    };
    let document: Document = serde_json::from_slice(json)?;
    build_asset(&document)
}

fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8]> {
    if read_u32(bytes, 0)? != GLB_MAGIC {
        return Err(invalid("bad GLB magic"));
    }
    let version = read_u32(bytes, 4)?;
    if version != GLB_VERSION {
        return Err(invalid(format!("unsupported GLB version {version}")));
    }
    let total = read_u32(bytes, 8)? as usize;
    if total > bytes.len() {
        return Err(invalid(format!(
            "GLB header declares {total} bytes but only {} are present",
            bytes.len()
        )));
    }

    let chunk_len = read_u32(bytes, GLB_HEADER_LEN)? as usize;
    let chunk_type = read_u32(bytes, GLB_HEADER_LEN + 4)?;
    if chunk_type != CHUNK_JSON {
        return Err(invalid("first GLB chunk is not JSON"));
    }
    let start = GLB_HEADER_LEN + CHUNK_HEADER_LEN;
    bytes
        .get(start..start + chunk_len)
        .ok_or_else(|| invalid("JSON chunk runs past the end of the file"))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|slice| <[u8; 4]>::try_from(slice).ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| invalid("truncated GLB header"))
}

fn build_asset(document: &Document) -> Result<ModelAsset> {
    let roots = root_nodes(document);
    let mut parts = Vec::new();
    let mut stack: Vec<(usize, Matrix4, usize)> = roots
        .into_iter()
        .rev()
        .map(|idx| (idx, identity(), 0))
        .collect();

    while let Some((idx, parent, depth)) = stack.pop() {
        if depth > document.nodes.len() {
            return Err(invalid("node hierarchy contains a cycle"));
        }
        let node = document
            .nodes
            .get(idx)
            .ok_or_else(|| invalid(format!("node {idx} does not exist")))?;
        let world = parent * node_matrix(node);

        if let Some(mesh_idx) = node.mesh {
            let mesh = document
                .meshes
                .get(mesh_idx)
                .ok_or_else(|| invalid(format!("mesh {mesh_idx} does not exist")))?;
            let base_name = mesh
                .name
                .clone()
                .or_else(|| node.name.clone())
                .unwrap_or_else(|| format!("mesh{mesh_idx}"));
            for (prim_idx, primitive) in mesh.primitives.iter().enumerate() {
                let Some(bounds) = primitive_bounds(document, primitive)? else {
                    continue;
                };
                let name = if mesh.primitives.len() > 1 {
                    format!("{base_name}_{prim_idx}")
                } else {
                    base_name.clone()
                };
                parts.push(MeshPart::new(name, bounds, world));
            }
        }

        for child in node.children.iter().rev() {
            stack.push((*child, world, depth + 1));
        }
    }

    Ok(ModelAsset {
        name: String::new(),
        parts,
    })
}

fn root_nodes(document: &Document) -> Vec<usize> {
    let scene_idx = document.scene.unwrap_or(0);
    if let Some(scene) = document.scenes.get(scene_idx) {
        return scene.nodes.clone();
    }
    let mut is_child = vec![false; document.nodes.len()];
    for node in &document.nodes {
        for child in &node.children {
            if let Some(slot) = is_child.get_mut(*child) {
                *slot = true;
            }
        }
    }
    (0..document.nodes.len()).filter(|idx| !is_child[*idx]).collect()
}

fn primitive_bounds(document: &Document, primitive: &PrimitiveDef) -> Result<Option<Aabb>> {
    let Some(accessor_idx) = primitive.attributes.get("POSITION") else {
        return Ok(None);
    };
    let accessor = document
        .accessors
        .get(*accessor_idx)
        .ok_or_else(|| invalid(format!("accessor {accessor_idx} does not exist")))?;
    match (accessor.min.as_deref(), accessor.max.as_deref()) {
        (Some([min_x, min_y, min_z]), Some([max_x, max_y, max_z])) => Ok(Some(Aabb::new(
            Point3::new(*min_x, *min_y, *min_z),
            Point3::new(*max_x, *max_y, *max_z),
        ))),
        _ => Err(invalid(format!(
            "POSITION accessor {accessor_idx} has no 3-component min/max"
        ))),
    }
}

fn node_matrix(node: &NodeDef) -> Matrix4 {
    if let Some(m) = node.matrix {
        return Matrix4::new(
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12],
            m[13], m[14], m[15],
        );
    }
    let [tx, ty, tz] = node.translation.unwrap_or([0.0, 0.0, 0.0]);
    let [qx, qy, qz, qw] = node.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]);
    let [sx, sy, sz] = node.scale.unwrap_or([1.0, 1.0, 1.0]);
    Matrix4::from_translation(Vector3::new(tx, ty, tz))
        * Matrix4::from(Quaternion::new(qw, qx, qy, qz))
        * Matrix4::from_nonuniform_scale(sx, sy, sz)
}

fn identity() -> Matrix4 {
    Matrix4::from_scale(1.0)
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::AssetLoad {
        name: "glTF".to_string(),
        reason: reason.into(),
    }
}
