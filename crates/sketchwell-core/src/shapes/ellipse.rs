//! Ellipse shape.

use super::normalized_corners;
use crate::geometry;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box spanned by two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// First defining corner of the bounding box.
    pub p1: Point,
    /// Second defining corner of the bounding box.
    pub p2: Point,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Center of the ellipse.
    pub fn center(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// Half-extents along x and y.
    pub fn radii(&self) -> (f64, f64) {
        (
            (self.p2.x - self.p1.x).abs() / 2.0,
            (self.p2.y - self.p1.y).abs() / 2.0,
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_ellipse(point, self.p1, self.p2, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        let (rx, ry) = self.radii();
        KurboEllipse::new(self.center(), (rx, ry), 0.0).to_path(0.1)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }

    pub fn adjust_orientation(&mut self) {
        (self.p1, self.p2) = normalized_corners(self.p1, self.p2);
    }
}
