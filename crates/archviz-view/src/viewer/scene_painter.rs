use archviz_editor::Outline;
use archviz_geometry::{Aabb, Matrix4, PlanePoint, Point3, Vector3};
use archviz_scene::Scene;
use cgmath::InnerSpace;

use super::overlay::OverlayPainter;
use super::state::ViewerState;
use super::ui::{Align2, Color32, Point2, Rect, Stroke, vec2};

const GRID_DIVISIONS: usize = 20;
const FLOOR_COLOR: Color32 = Color32::from_gray(128);
const GRID_COLOR: Color32 = Color32::from_rgba_unmultiplied(70, 70, 70, 200);
const GRID_AXIS_COLOR: Color32 = Color32::from_rgba_unmultiplied(40, 40, 40, 230);
const WALL_COLOR: Color32 = Color32::from_gray(215);
const FURNITURE_COLOR: Color32 = Color32::from_rgb(190, 160, 128);
const EDGE_COLOR: Color32 = Color32::from_rgba_unmultiplied(30, 30, 30, 90);
const PREVIEW_COLOR: Color32 = Color32::from_rgb(255, 255, 0);
const OUTLINE_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
const LABEL_BG: Color32 = Color32::from_rgba_unmultiplied(0, 0, 0, 150);
const LABEL_TEXT: Color32 = Color32::from_gray(255);
// Hemisphere light: sky white, ground black.
const AMBIENT: f32 = 0.35;

struct Face {
    points: Vec<Point2>,
    depth: f64,
    color: Color32,
}

/// Floor quad and grid lines.
pub fn paint_ground<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    half_extent: f64,
    height: f64,
) {
    let corners = [
        Point3::new(-half_extent, height, -half_extent),
        Point3::new(half_extent, height, -half_extent),
        Point3::new(half_extent, height, half_extent),
        Point3::new(-half_extent, height, half_extent),
    ];
    if let Some(points) = project_all(viewer, rect, &corners) {
        painter.polygon(points, FLOOR_COLOR, Stroke::new(1.0, GRID_COLOR));
    }

    let step = 2.0 * half_extent / GRID_DIVISIONS as f64;
    for index in 0..=GRID_DIVISIONS {
        let offset = -half_extent + step * index as f64;
        let color = if offset.abs() < step * 0.5 {
            GRID_AXIS_COLOR
        } else {
            GRID_COLOR
        };
        let stroke = Stroke::new(1.0, color);
        paint_segment(
            painter,
            viewer,
            rect,
            Point3::new(offset, height, -half_extent),
            Point3::new(offset, height, half_extent),
            stroke,
        );
        paint_segment(
            painter,
            viewer,
            rect,
            Point3::new(-half_extent, height, offset),
            Point3::new(half_extent, height, offset),
            stroke,
        );
    }
}

/// Walls and furniture as shaded boxes, painted far to near.
pub fn paint_scene<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    scene: &Scene,
) {
    let eye = viewer.camera_position();
    let mut faces = Vec::new();
    for placed in scene.walls() {
        let wall = &placed.wall;
        collect_faces(
            &mut faces,
            viewer,
            rect,
            eye,
            &wall.local_bounds(),
            &wall.world_matrix(),
            WALL_COLOR,
        );
    }
    for item in scene.furniture() {
        for part in &item.parts {
            collect_faces(
                &mut faces,
                viewer,
                rect,
                eye,
                &part.bounds,
                &item.part_matrix(part),
                FURNITURE_COLOR,
            );
        }
    }

    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for face in faces {
        painter.polygon(face.points, face.color, Stroke::new(0.6, EDGE_COLOR));
    }
}

/// Length labels as billboards at their synced positions.
pub fn paint_labels<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    scene: &Scene,
) {
    for placed in scene.walls() {
        let label = &placed.label;
        let Some(pos) = viewer.project_point(label.position, rect) else {
            continue;
        };
        if !rect.contains(pos) {
            continue;
        }
        let width = 9.0 * label.text.chars().count() as f32 + 10.0;
        let background = Rect::from_center_size(pos, vec2(width, 20.0));
        painter.rect_filled(background, 4.0, LABEL_BG);
        painter.text(pos, Align2::CenterCenter, label.text.clone(), 14.0, LABEL_TEXT);
    }
}

pub fn paint_preview<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    preview: Option<(PlanePoint, PlanePoint)>,
    height: f64,
) {
    let Some((start, end)) = preview else {
        return;
    };
    let stroke = Stroke::new(2.5, PREVIEW_COLOR);
    paint_segment(
        painter,
        viewer,
        rect,
        start.to_point(height),
        end.to_point(height),
        stroke,
    );
    if let Some(pos) = viewer.project_point(start.to_point(height), rect) {
        painter.circle_filled(pos, 4.0, PREVIEW_COLOR);
    }
}

pub fn paint_outline<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    outline: Option<&Outline>,
) {
    let Some(outline) = outline else {
        return;
    };
    let stroke = Stroke::new(2.0, OUTLINE_COLOR);
    for [start, end] in &outline.segments {
        paint_segment(painter, viewer, rect, *start, *end, stroke);
    }
}

fn collect_faces(
    faces: &mut Vec<Face>,
    viewer: &ViewerState,
    rect: Rect,
    eye: Point3,
    bounds: &Aabb,
    matrix: &Matrix4,
    base: Color32,
) {
    for quad in bounds.faces(matrix) {
        let normal = (quad[1] - quad[0]).cross(quad[2] - quad[1]);
        if normal.magnitude() <= 1.0e-12 {
            continue;
        }
        let normal = normal.normalize();
        let centroid = Point3::new(
            (quad[0].x + quad[1].x + quad[2].x + quad[3].x) * 0.25,
            (quad[0].y + quad[1].y + quad[2].y + quad[3].y) * 0.25,
            (quad[0].z + quad[1].z + quad[2].z + quad[3].z) * 0.25,
        );
        if normal.dot(centroid - eye) >= 0.0 {
            continue;
        }
        let Some(points) = project_all(viewer, rect, &quad) else {
            continue;
        };
        faces.push(Face {
            points,
            depth: (centroid - eye).magnitude(),
            color: base.shaded(hemisphere(normal)),
        });
    }
}

fn hemisphere(normal: Vector3) -> f32 {
    let sky = (normal.y * 0.5 + 0.5) as f32;
    AMBIENT + (1.0 - AMBIENT) * sky
}

fn project_all(viewer: &ViewerState, rect: Rect, points: &[Point3]) -> Option<Vec<Point2>> {
    points
        .iter()
        .map(|point| viewer.project_point(*point, rect))
        .collect()
}

fn paint_segment<P: OverlayPainter>(
    painter: &mut P,
    viewer: &ViewerState,
    rect: Rect,
    start: Point3,
    end: Point3,
    stroke: Stroke,
) {
    if let (Some(a), Some(b)) = (
        viewer.project_point(start, rect),
        viewer.project_point(end, rect),
    ) {
        painter.line_segment(a, b, stroke);
    }
}
