//! Screen-space hit-testing of projected polygons.

use glam::Vec2;
use kurbo::{BezPath, Line, PathSeg, Point, Rect, Shape};

/// Axis-aligned pixel box (query rectangle)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl PixelBox {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of `margin` pixels on every side of `point`.
    pub fn around(point: Vec2, margin: f32) -> Self {
        let m = Vec2::splat(margin);
        Self::new(point - m, point + m)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    fn to_rect(self) -> Rect {
        Rect::new(
            self.min.x as f64,
            self.min.y as f64,
            self.max.x as f64,
            self.max.y as f64,
        )
    }
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

/// Closed path through the given screen points.
pub fn polygon_path(points: &[Vec2]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(to_point(*first));
        for p in iter {
            path.line_to(to_point(*p));
        }
        path.close_path();
    }
    path
}

/// Non-zero winding containment test.
pub fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    polygon_path(points).contains(to_point(p))
}

/// True if the polygon outline or interior touches the box.
pub fn polygon_hits_box(points: &[Vec2], bbox: &PixelBox) -> bool {
    if points.is_empty() {
        return false;
    }
    // Vertex inside the box
    if points.iter().any(|p| bbox.contains(*p)) {
        return true;
    }
    // Box entirely inside the polygon
    if polygon_contains(points, bbox.center()) {
        return true;
    }
    // Edge crossing
    let rect = bbox.to_rect();
    let rect_edges = [
        Line::new((rect.x0, rect.y0), (rect.x1, rect.y0)),
        Line::new((rect.x1, rect.y0), (rect.x1, rect.y1)),
        Line::new((rect.x1, rect.y1), (rect.x0, rect.y1)),
        Line::new((rect.x0, rect.y1), (rect.x0, rect.y0)),
    ];
    let n = points.len();
    (0..n).any(|i| {
        let edge = PathSeg::Line(Line::new(to_point(points[i]), to_point(points[(i + 1) % n])));
        rect_edges
            .iter()
            .any(|r| !edge.intersect_line(*r).is_empty())
    })
}
