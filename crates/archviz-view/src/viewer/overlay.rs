use super::ui::{Align2, Color32, Point2, Rect, Stroke};

/// Shapes the viewport draws on top of the window, in viewport coordinates.
pub trait OverlayPainter {
    fn rect_filled(&mut self, rect: Rect, radius: f32, fill: Color32);
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke);
    fn circle_filled(&mut self, center: Point2, radius: f32, fill: Color32);
    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke);
    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32);
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub enum OverlayShape {
    Rect {
        rect: Rect,
        fill: Color32,
    },
    Line {
        start: Point2,
        end: Point2,
        stroke: Stroke,
    },
    Circle {
        center: Point2,
        radius: f32,
        fill: Color32,
    },
    Polygon {
        points: Vec<Point2>,
        fill: Color32,
        stroke: Stroke,
    },
    Text {
        pos: Point2,
        text: String,
        color: Color32,
    },
}

/// Records shapes instead of drawing them.
#[cfg(test)]
#[derive(Default)]
pub struct OverlayCollector {
    pub shapes: Vec<OverlayShape>,
}

#[cfg(test)]
impl OverlayCollector {
    pub fn lines(&self) -> impl Iterator<Item = (&Point2, &Point2, &Stroke)> {
        self.shapes.iter().filter_map(|shape| match shape {
            OverlayShape::Line { start, end, stroke } => Some((start, end, stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|shape| match shape {
            OverlayShape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, OverlayShape::Polygon { .. }))
            .count()
    }
}

#[cfg(test)]
impl OverlayPainter for OverlayCollector {
    fn rect_filled(&mut self, rect: Rect, _radius: f32, fill: Color32) {
        self.shapes.push(OverlayShape::Rect { rect, fill });
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        self.shapes.push(OverlayShape::Line { start, end, stroke });
    }

    fn circle_filled(&mut self, center: Point2, radius: f32, fill: Color32) {
        self.shapes.push(OverlayShape::Circle {
            center,
            radius,
            fill,
        });
    }

    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke) {
        self.shapes.push(OverlayShape::Polygon {
            points,
            fill,
            stroke,
        });
    }

    fn text(&mut self, pos: Point2, _align: Align2, text: String, _size: f32, color: Color32) {
        self.shapes.push(OverlayShape::Text { pos, text, color });
    }
}
