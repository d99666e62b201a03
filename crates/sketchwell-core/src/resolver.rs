//! Position resolution: which shape, and which part of it, a canvas point
//! addresses.
//!
//! Shapes are tested front-to-back (descending z). For each shape the resize
//! handles are tested before the body, so a handle wins even when it sits on
//! the shape outline. The first shape with any matching part ends the search;
//! shapes underneath are never considered.

use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Tolerance for handle hits, in canvas units.
pub const HANDLE_TOLERANCE: f64 = 5.0;
/// Tolerance for body hits, in canvas units.
pub const HIT_TOLERANCE: f64 = 5.0;

/// The part of a shape a point addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapePart {
    /// The shape body (move target).
    Inside,
    /// Corner handles for box-like shapes.
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Vertex handles for diamonds (all four) and triangles (top only).
    Top,
    Right,
    Bottom,
    Left,
    /// Endpoint handles for lines and arrows.
    Start,
    End,
}

impl ShapePart {
    /// Whether this part is a resize handle (anything but the body).
    pub fn is_handle(self) -> bool {
        self != ShapePart::Inside
    }

    /// Cursor to show while hovering this part.
    pub fn cursor(self) -> CursorHint {
        match self {
            ShapePart::Inside => CursorHint::Move,
            ShapePart::TopLeft | ShapePart::BottomRight => CursorHint::ResizeNwse,
            ShapePart::TopRight | ShapePart::BottomLeft => CursorHint::ResizeNesw,
            ShapePart::Top | ShapePart::Bottom => CursorHint::ResizeNs,
            ShapePart::Left | ShapePart::Right => CursorHint::ResizeEw,
            ShapePart::Start | ShapePart::End => CursorHint::ResizePoint,
        }
    }
}

/// Cursor suggestion for the host; the engine never touches the real cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    ResizeNwse,
    ResizeNesw,
    ResizeNs,
    ResizeEw,
    ResizePoint,
}

/// A resolved position: the topmost shape under the point and the part hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ShapeId,
    pub part: ShapePart,
}

/// The resize handles a shape exposes, with their canvas positions.
pub fn handles(shape: &Shape) -> Vec<(ShapePart, Point)> {
    match &shape.kind {
        ShapeKind::Rectangle(_) | ShapeKind::Ellipse(_) => {
            let b = shape.bounds();
            vec![
                (ShapePart::TopLeft, Point::new(b.x0, b.y0)),
                (ShapePart::TopRight, Point::new(b.x1, b.y0)),
                (ShapePart::BottomLeft, Point::new(b.x0, b.y1)),
                (ShapePart::BottomRight, Point::new(b.x1, b.y1)),
            ]
        }
        ShapeKind::Triangle(t) => {
            let [apex, bl, br] = t.vertices();
            vec![
                (ShapePart::Top, apex),
                (ShapePart::BottomLeft, bl),
                (ShapePart::BottomRight, br),
            ]
        }
        ShapeKind::Diamond(d) => {
            let [top, right, bottom, left] = d.vertices();
            vec![
                (ShapePart::Top, top),
                (ShapePart::Right, right),
                (ShapePart::Bottom, bottom),
                (ShapePart::Left, left),
            ]
        }
        ShapeKind::Line(l) => vec![(ShapePart::Start, l.start), (ShapePart::End, l.end)],
        ShapeKind::Arrow(a) => vec![(ShapePart::Start, a.start), (ShapePart::End, a.end)],
        // Pencil strokes and text have no resize handles
        ShapeKind::Pencil(_) | ShapeKind::Text(_) => Vec::new(),
    }
}

/// Resolve which part of a single shape the point addresses, if any.
pub fn resolve_part(shape: &Shape, point: Point, tolerance: f64) -> Option<ShapePart> {
    for (part, pos) in handles(shape) {
        if geometry::point_near_point(point, pos, HANDLE_TOLERANCE) {
            return Some(part);
        }
    }
    shape.hit_test(point, tolerance).then_some(ShapePart::Inside)
}

/// Resolve the topmost shape (and part) under a canvas point.
///
/// `shapes` must be ordered front-to-back (descending z, ties broken so the
/// later-added shape comes first); the first match wins.
pub fn resolve_position<'a>(
    point: Point,
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> Option<Hit> {
    shapes.into_iter().find_map(|shape| {
        resolve_part(shape, point, HIT_TOLERANCE).map(|part| Hit {
            id: shape.id(),
            part,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape, ShapeStyle};

    fn rect_shape(id: u64, x0: f64, y0: f64, x1: f64, y1: f64, z: i64) -> Shape {
        Shape::new(
            ShapeId(id),
            ShapeKind::Rectangle(Rectangle::new(Point::new(x0, y0), Point::new(x1, y1))),
            ShapeStyle::default(),
            z,
        )
    }

    #[test]
    fn test_inside_and_miss() {
        let shape = rect_shape(1, 0.0, 0.0, 100.0, 100.0, 0);
        let shapes = [&shape];
        let hit = resolve_position(Point::new(50.0, 50.0), shapes).unwrap();
        assert_eq!(hit.part, ShapePart::Inside);
        assert!(resolve_position(Point::new(200.0, 200.0), [&shape]).is_none());
    }

    #[test]
    fn test_corner_handle_beats_body() {
        let shape = rect_shape(1, 0.0, 0.0, 100.0, 100.0, 0);
        let hit = resolve_position(Point::new(0.0, 0.0), [&shape]).unwrap();
        assert_eq!(hit.part, ShapePart::TopLeft);
        let hit = resolve_position(Point::new(99.0, 99.0), [&shape]).unwrap();
        assert_eq!(hit.part, ShapePart::BottomRight);
    }

    #[test]
    fn test_topmost_shape_wins() {
        let below = rect_shape(1, 0.0, 0.0, 100.0, 100.0, 1);
        let above = rect_shape(2, 0.0, 0.0, 100.0, 100.0, 2);
        // Front-to-back ordering: higher z first
        let hit = resolve_position(Point::new(50.0, 50.0), [&above, &below]).unwrap();
        assert_eq!(hit.id, ShapeId(2));
    }

    #[test]
    fn test_line_endpoint_handles() {
        let shape = Shape::new(
            ShapeId(1),
            ShapeKind::Line(crate::shapes::Line::new(
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
            )),
            ShapeStyle::default(),
            0,
        );
        assert_eq!(
            resolve_part(&shape, Point::new(1.0, 1.0), HIT_TOLERANCE),
            Some(ShapePart::Start)
        );
        assert_eq!(
            resolve_part(&shape, Point::new(99.0, 0.0), HIT_TOLERANCE),
            Some(ShapePart::End)
        );
        assert_eq!(
            resolve_part(&shape, Point::new(50.0, 0.0), HIT_TOLERANCE),
            Some(ShapePart::Inside)
        );
    }

    #[test]
    fn test_diamond_vertex_handles() {
        let shape = Shape::new(
            ShapeId(1),
            ShapeKind::Diamond(crate::shapes::Diamond::new(
                Point::new(0.0, 0.0),
                Point::new(100.0, 100.0),
            )),
            ShapeStyle::default(),
            0,
        );
        assert_eq!(
            resolve_part(&shape, Point::new(50.0, 1.0), HIT_TOLERANCE),
            Some(ShapePart::Top)
        );
        assert_eq!(
            resolve_part(&shape, Point::new(2.0, 50.0), HIT_TOLERANCE),
            Some(ShapePart::Left)
        );
    }

    #[test]
    fn test_pencil_has_no_handles() {
        let shape = Shape::new(
            ShapeId(1),
            ShapeKind::Pencil(crate::shapes::Pencil::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
            ])),
            ShapeStyle::default(),
            0,
        );
        assert!(handles(&shape).is_empty());
        assert_eq!(
            resolve_part(&shape, Point::new(0.0, 0.0), HIT_TOLERANCE),
            Some(ShapePart::Inside)
        );
    }
}
