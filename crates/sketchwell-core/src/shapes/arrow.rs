//! Arrow shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An arrow: a line segment with an arrowhead at the end point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Size of the arrowhead.
    pub head_size: f64,
}

impl Arrow {
    /// Default arrowhead size.
    pub const DEFAULT_HEAD_SIZE: f64 = 15.0;

    /// Create a new arrow.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            head_size: Self::DEFAULT_HEAD_SIZE,
        }
    }

    /// Direction vector (normalized). Degenerate arrows point right.
    pub fn direction(&self) -> Vec2 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(dx / len, dy / len)
        }
    }

    /// Length of the shaft.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// The two arrowhead wing points.
    fn wings(&self) -> (Point, Point) {
        let dir = self.direction();
        let perp = Vec2::new(-dir.y, dir.x);
        let back = Point::new(
            self.end.x - dir.x * self.head_size,
            self.end.y - dir.y * self.head_size,
        );
        (
            Point::new(
                back.x + perp.x * self.head_size * 0.5,
                back.y + perp.y * self.head_size * 0.5,
            ),
            Point::new(
                back.x - perp.x * self.head_size * 0.5,
                back.y - perp.y * self.head_size * 0.5,
            ),
        )
    }

    pub fn bounds(&self) -> Rect {
        let (left, right) = self.wings();
        Rect::from_points(self.start, self.end)
            .union_pt(left)
            .union_pt(right)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_near_segment(point, self.start, self.end, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        let (left, right) = self.wings();
        path.move_to(left);
        path.line_to(self.end);
        path.line_to(right);
        path
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Arrows are directional: the head must stay where the user put it, so
    /// orientation is never normalized.
    pub fn adjust_orientation(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_include_head() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let bounds = arrow.bounds();
        // Wings extend half the head size on either side of the shaft
        assert!(bounds.y0 <= -7.0);
        assert!(bounds.y1 >= 7.0);
    }

    #[test]
    fn test_orientation_preserved() {
        let mut arrow = Arrow::new(Point::new(100.0, 0.0), Point::new(0.0, 0.0));
        arrow.adjust_orientation();
        assert_eq!(arrow.start, Point::new(100.0, 0.0));
        assert_eq!(arrow.end, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_hit_test_on_shaft() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(arrow.hit_test(Point::new(50.0, 50.0), 1.0));
        assert!(!arrow.hit_test(Point::new(90.0, 10.0), 5.0));
    }
}
