use egui::FontId;

use crate::viewer::{Align2, Color32, OverlayPainter, Point2, Rect, Stroke};

/// Draws viewer overlay shapes with an egui painter, shifted to the
/// viewport's position in the window.
pub(super) struct EguiOverlayPainter<'a> {
    painter: &'a egui::Painter,
    offset: egui::Vec2,
}

impl<'a> EguiOverlayPainter<'a> {
    pub fn new(painter: &'a egui::Painter, offset: egui::Vec2) -> Self {
        Self { painter, offset }
    }
}

impl OverlayPainter for EguiOverlayPainter<'_> {
    fn rect_filled(&mut self, rect: Rect, radius: f32, fill: Color32) {
        let egui_rect = to_egui_rect(rect, self.offset);
        self.painter
            .rect_filled(egui_rect, radius, to_egui_color(fill));
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        let points = [
            to_egui_pos(start, self.offset),
            to_egui_pos(end, self.offset),
        ];
        self.painter.line_segment(points, to_egui_stroke(stroke));
    }

    fn circle_filled(&mut self, center: Point2, radius: f32, fill: Color32) {
        let center = to_egui_pos(center, self.offset);
        self.painter
            .circle_filled(center, radius, to_egui_color(fill));
    }

    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke) {
        let points: Vec<egui::Pos2> =
            points.into_iter().map(|p| to_egui_pos(p, self.offset)).collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            to_egui_color(fill),
            to_egui_stroke(stroke),
        ));
    }

    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32) {
        let pos = to_egui_pos(pos, self.offset);
        let align = match align {
            Align2::LeftTop => egui::Align2::LEFT_TOP,
            Align2::CenterCenter => egui::Align2::CENTER_CENTER,
        };
        self.painter.text(
            pos,
            align,
            text,
            FontId::proportional(size),
            to_egui_color(color),
        );
    }
}

fn to_egui_pos(pos: Point2, offset: egui::Vec2) -> egui::Pos2 {
    egui::pos2(pos.x + offset.x, pos.y + offset.y)
}

fn to_egui_rect(rect: Rect, offset: egui::Vec2) -> egui::Rect {
    egui::Rect::from_min_max(to_egui_pos(rect.min, offset), to_egui_pos(rect.max, offset))
}

fn to_egui_color(color: Color32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn to_egui_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, to_egui_color(stroke.color))
}
