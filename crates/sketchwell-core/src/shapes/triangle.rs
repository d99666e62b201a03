//! Triangle shape.

use super::normalized_corners;
use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An isosceles triangle inscribed in the box spanned by two corners:
/// apex at the top-center, base along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First defining corner of the bounding box.
    pub p1: Point,
    /// Second defining corner of the bounding box.
    pub p2: Point,
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The three vertices: apex, bottom-left, bottom-right.
    pub fn vertices(&self) -> [Point; 3] {
        let (tl, br) = normalized_corners(self.p1, self.p2);
        [
            Point::new((tl.x + br.x) / 2.0, tl.y),
            Point::new(tl.x, br.y),
            Point::new(br.x, br.y),
        ]
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let [apex, bl, br] = self.vertices();
        geometry::point_in_triangle(point, apex, bl, br, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let [apex, bl, br] = self.vertices();
        let mut path = BezPath::new();
        path.move_to(apex);
        path.line_to(br);
        path.line_to(bl);
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
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let [apex, bl, br] = tri.vertices();
        assert_eq!(apex, Point::new(50.0, 0.0));
        assert_eq!(bl, Point::new(0.0, 100.0));
        assert_eq!(br, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_hit_test() {
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(tri.hit_test(Point::new(50.0, 60.0), 0.0));
        // Bounding-box corner above the sloped edge
        assert!(!tri.hit_test(Point::new(2.0, 2.0), 0.0));
    }

    #[test]
    fn test_zero_extent_is_no_match() {
        let tri = Triangle::new(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert!(!tri.hit_test(Point::new(10.0, 10.0), 0.0));
    }
}
