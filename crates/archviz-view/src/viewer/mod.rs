mod input;
mod overlay;
mod scene_painter;
mod state;
mod transform_gizmo;
mod ui;

pub use input::ViewerInput;
pub use overlay::OverlayPainter;
pub use scene_painter::{paint_ground, paint_labels, paint_outline, paint_preview, paint_scene};
pub use state::ViewerState;
pub use transform_gizmo::{GizmoHandle, drag_amount, draw as draw_gizmo, handles as gizmo_handles, pick as pick_gizmo};
pub use ui::{Align2, Color32, Point2, Rect, Stroke, Vec2};
