//! Pencil (freehand) shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke: an ordered sequence of points.
///
/// Points are append-only while the stroke is being drawn and rewritten
/// wholesale when the shape is moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pencil {
    /// Points along the stroke, in draw order.
    pub points: Vec<Point>,
}

impl Pencil {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Append a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_near_polyline(point, &self.points, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };
        path.move_to(*first);
        for point in &self.points[1..] {
            path.line_to(*point);
        }
        path
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let pencil = Pencil::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
        ]);
        let bounds = pencil.bounds();
        assert!(bounds.x0.abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_on_segment() {
        let pencil = Pencil::from_points(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert!(pencil.hit_test(Point::new(50.0, 2.0), 5.0));
        assert!(!pencil.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_single_point_hit_test() {
        let pencil = Pencil::from_points(vec![Point::new(10.0, 10.0)]);
        assert!(pencil.hit_test(Point::new(12.0, 10.0), 5.0));
        assert!(!pencil.hit_test(Point::new(20.0, 10.0), 5.0));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut pencil = Pencil::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        pencil.translate(Vec2::new(5.0, 5.0));
        assert_eq!(pencil.points[0], Point::new(5.0, 5.0));
        assert_eq!(pencil.points[1], Point::new(15.0, 5.0));
    }
}
