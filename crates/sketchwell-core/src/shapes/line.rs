//! Line shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_near_segment(point, self.start, self.end, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Swap the endpoints when the line was drawn right-to-left (or
    /// bottom-up at equal x), so `start` reads left/top-first afterwards.
    pub fn adjust_orientation(&mut self) {
        let backwards = self.start.x > self.end.x
            || (self.start.x == self.end.x && self.start.y > self.end.y);
        if backwards {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_on_segment() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(50.0, 3.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_zero_length_hit_test() {
        let line = Line::new(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert!(line.hit_test(Point::new(12.0, 10.0), 5.0));
        assert!(!line.hit_test(Point::new(20.0, 10.0), 5.0));
    }

    #[test]
    fn test_adjust_orientation_swaps_backwards_line() {
        let mut line = Line::new(Point::new(100.0, 0.0), Point::new(0.0, 50.0));
        line.adjust_orientation();
        assert_eq!(line.start, Point::new(0.0, 50.0));
        assert_eq!(line.end, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_adjust_orientation_vertical() {
        let mut line = Line::new(Point::new(10.0, 80.0), Point::new(10.0, 20.0));
        line.adjust_orientation();
        assert_eq!(line.start, Point::new(10.0, 20.0));
        assert_eq!(line.end, Point::new(10.0, 80.0));
    }

    #[test]
    fn test_adjust_orientation_keeps_forward_line() {
        let mut line = Line::new(Point::new(0.0, 50.0), Point::new(100.0, 0.0));
        line.adjust_orientation();
        assert_eq!(line.start, Point::new(0.0, 50.0));
    }
}
