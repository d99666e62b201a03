//! Diamond shape.

use super::normalized_corners;
use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A diamond (rhombus) inscribed in the box spanned by two corners, with
/// vertices at the midpoints of the bounding edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diamond {
    /// First defining corner of the bounding box.
    pub p1: Point,
    /// Second defining corner of the bounding box.
    pub p2: Point,
}

impl Diamond {
    /// Create a new diamond.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The four vertices: top, right, bottom, left.
    pub fn vertices(&self) -> [Point; 4] {
        let (tl, br) = normalized_corners(self.p1, self.p2);
        let cx = (tl.x + br.x) / 2.0;
        let cy = (tl.y + br.y) / 2.0;
        [
            Point::new(cx, tl.y),
            Point::new(br.x, cy),
            Point::new(cx, br.y),
            Point::new(tl.x, cy),
        ]
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_diamond(point, self.p1, self.p2, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let [top, right, bottom, left] = self.vertices();
        let mut path = BezPath::new();
        path.move_to(top);
        path.line_to(right);
        path.line_to(bottom);
        path.line_to(left);
        path.close_path();
        path
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }

    pub fn adjust_orientation(&mut self) {
        (self.p1, self.p2) = normalized_corners(self.p1, self.p2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let diamond = Diamond::new(Point::new(0.0, 0.0), Point::new(100.0, 60.0));
        let [top, right, bottom, left] = diamond.vertices();
        assert_eq!(top, Point::new(50.0, 0.0));
        assert_eq!(right, Point::new(100.0, 30.0));
        assert_eq!(bottom, Point::new(50.0, 60.0));
        assert_eq!(left, Point::new(0.0, 30.0));
    }

    #[test]
    fn test_hit_test() {
        let diamond = Diamond::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(diamond.hit_test(Point::new(50.0, 50.0), 0.0));
        // Bounding-box corner is outside the diamond
        assert!(!diamond.hit_test(Point::new(5.0, 5.0), 0.0));
    }
}
