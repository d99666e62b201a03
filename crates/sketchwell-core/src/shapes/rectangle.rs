//! Rectangle shape.

use super::normalized_corners;
use crate::geometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by two corners.
///
/// The corners stay in drag order mid-gesture and are normalized to
/// top-left/bottom-right when the gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// First defining corner.
    pub p1: Point,
    /// Second defining corner.
    pub p2: Point,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_box(point, self.p1, self.p2, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }

    pub fn adjust_orientation(&mut self) {
        (self.p1, self.p2) = normalized_corners(self.p1, self.p2);
    }
}
