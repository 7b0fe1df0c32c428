use archviz_geometry::Vector3;
use archviz_scene::Scene;

use crate::EditorSettings;

/// Pins every label above its wall using the current height setting.
///
/// Returns how many labels were visited.
pub fn sync_labels(scene: &mut Scene, settings: &EditorSettings) -> usize {
    let lift = Vector3::new(0.0, settings.wall_height * 0.5 + settings.label_gap, 0.0);
    let walls = scene.walls_mut();
    for placed in walls.iter_mut() {
        placed.label.position = placed.wall.position() + lift;
    }
    walls.len()
}
