use archviz_editor::{GizmoAxis, TransformMode};
use archviz_geometry::{Point3, Vector3};
use cgmath::InnerSpace;

use super::overlay::OverlayPainter;
use super::state::ViewerState;
use super::ui::{Color32, Point2, Rect, Stroke, vec2};

/// Handle size relative to the default on-screen length.
pub const GIZMO_SIZE: f64 = 0.8;
const HANDLE_PIXELS: f64 = 110.0;
const RING_SEGMENTS: usize = 48;
const PICK_RADIUS: f32 = 8.0;

const AXIS_COLOR_X: Color32 = Color32::from_rgb(250, 102, 104);
const AXIS_COLOR_Y: Color32 = Color32::from_rgb(17, 235, 107);
const AXIS_COLOR_Z: Color32 = Color32::from_rgb(102, 137, 239);
const ACTIVE_COLOR: Color32 = Color32::from_rgb(255, 230, 90);

/// Screen-space geometry of one axis handle.
#[derive(Clone, Debug)]
pub struct GizmoHandle {
    pub axis: GizmoAxis,
    pub center: Point2,
    pub tip: Point2,
    /// Closed ring in rotate mode, empty otherwise.
    pub ring: Vec<Point2>,
    /// World length of the handle.
    pub length: f64,
}

impl GizmoHandle {
    fn distance_to(&self, pos: Point2) -> f32 {
        if self.ring.is_empty() {
            return pos.distance_to_segment(self.center, self.tip);
        }
        self.ring
            .iter()
            .zip(self.ring.iter().cycle().skip(1))
            .map(|(a, b)| pos.distance_to_segment(*a, *b))
            .fold(f32::INFINITY, f32::min)
    }
}

/// Lays out the three handles around `origin`.
pub fn handles(
    viewer: &ViewerState,
    rect: Rect,
    origin: Point3,
    mode: TransformMode,
) -> Vec<GizmoHandle> {
    let Some(center) = viewer.project_point(origin, rect) else {
        return Vec::new();
    };
    let length = GIZMO_SIZE * HANDLE_PIXELS * viewer.world_per_pixel(origin, rect);
    GizmoAxis::ALL
        .into_iter()
        .filter_map(|axis| {
            let tip = viewer.project_point(origin + axis.unit() * length, rect)?;
            let ring = match mode {
                TransformMode::Rotate => ring_points(viewer, rect, origin, axis, length),
                TransformMode::Translate | TransformMode::Scale => Vec::new(),
            };
            Some(GizmoHandle {
                axis,
                center,
                tip,
                ring,
                length,
            })
        })
        .collect()
}

/// Handle under the pointer, nearest first.
pub fn pick(handles: &[GizmoHandle], pos: Point2) -> Option<GizmoAxis> {
    handles
        .iter()
        .map(|handle| (handle.axis, handle.distance_to(pos)))
        .filter(|(_, distance)| *distance <= PICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(axis, _)| axis)
}

pub fn draw<P: OverlayPainter>(
    painter: &mut P,
    handles: &[GizmoHandle],
    mode: TransformMode,
    highlight: Option<GizmoAxis>,
) {
    for handle in handles {
        let color = if Some(handle.axis) == highlight {
            ACTIVE_COLOR
        } else {
            axis_color(handle.axis)
        };
        let stroke = Stroke::new(2.5, color);
        match mode {
            TransformMode::Translate => {
                painter.line_segment(handle.center, handle.tip, stroke);
                draw_arrow_head(painter, handle, color);
            }
            TransformMode::Rotate => {
                for (a, b) in handle.ring.iter().zip(handle.ring.iter().cycle().skip(1)) {
                    painter.line_segment(*a, *b, stroke);
                }
            }
            TransformMode::Scale => {
                painter.line_segment(handle.center, handle.tip, stroke);
                let tip = Rect::from_center_size(handle.tip, vec2(9.0, 9.0));
                painter.rect_filled(tip, 1.0, color);
            }
        }
    }
    if let Some(handle) = handles.first() {
        painter.circle_filled(handle.center, 3.5, Color32::from_gray(235));
    }
}

/// Converts pointer travel since `press` into a drag amount for
/// [`archviz_editor::GizmoDrag::apply`].
pub fn drag_amount(
    viewer: &ViewerState,
    handle: &GizmoHandle,
    mode: TransformMode,
    press: Point2,
    pos: Point2,
) -> f64 {
    match mode {
        TransformMode::Translate | TransformMode::Scale => {
            let axis = handle.tip - handle.center;
            let axis_pixels = axis.length();
            if axis_pixels <= 1.0 {
                return 0.0;
            }
            let along = (pos - press).dot(axis) / axis_pixels;
            let ratio = (along / axis_pixels) as f64;
            match mode {
                TransformMode::Translate => ratio * handle.length,
                _ => ratio,
            }
        }
        TransformMode::Rotate => {
            let from = press - handle.center;
            let to = pos - handle.center;
            if from.length() <= 1.0 || to.length() <= 1.0 {
                return 0.0;
            }
            let clockwise = from.cross(to).atan2(from.dot(to)) as f64;
            rotation_sign(viewer, handle.axis) * clockwise
        }
    }
}

// Yaw turns +X toward +Z, the other axes follow the right-hand rule.
fn rotation_sign(viewer: &ViewerState, axis: GizmoAxis) -> f64 {
    let facing = axis.unit().dot(viewer.view_direction()) < 0.0;
    let right_handed = !matches!(axis, GizmoAxis::Y);
    let mut sign = if facing { 1.0 } else { -1.0 };
    if right_handed {
        sign = -sign;
    }
    sign
}

fn ring_points(
    viewer: &ViewerState,
    rect: Rect,
    origin: Point3,
    axis: GizmoAxis,
    radius: f64,
) -> Vec<Point2> {
    let (u, v) = match axis {
        GizmoAxis::X => (Vector3::unit_y(), Vector3::unit_z()),
        GizmoAxis::Y => (Vector3::unit_z(), Vector3::unit_x()),
        GizmoAxis::Z => (Vector3::unit_x(), Vector3::unit_y()),
    };
    (0..RING_SEGMENTS)
        .filter_map(|index| {
            let angle = std::f64::consts::TAU * index as f64 / RING_SEGMENTS as f64;
            let (sin, cos) = angle.sin_cos();
            viewer.project_point(origin + (u * cos + v * sin) * radius, rect)
        })
        .collect()
}

fn draw_arrow_head<P: OverlayPainter>(painter: &mut P, handle: &GizmoHandle, color: Color32) {
    let dir = handle.tip - handle.center;
    let len = dir.length();
    if len <= 1.0 {
        return;
    }
    let unit = dir * (1.0 / len);
    let side = vec2(-unit.y, unit.x);
    let base = handle.tip + unit * -10.0;
    let points = vec![
        handle.tip + unit * 4.0,
        base + side * 5.0,
        base + side * -5.0,
    ];
    painter.polygon(points, color, Stroke::new(1.0, color));
}

fn axis_color(axis: GizmoAxis) -> Color32 {
    match axis {
        GizmoAxis::X => AXIS_COLOR_X,
        GizmoAxis::Y => AXIS_COLOR_Y,
        GizmoAxis::Z => AXIS_COLOR_Z,
    }
}
