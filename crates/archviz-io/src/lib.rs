pub mod gltf;
pub mod models;

pub use gltf::{GLB_MAGIC, parse_model};
pub use models::{DEFAULT_MODELS_DIR, load_furniture, load_model, model_path};
