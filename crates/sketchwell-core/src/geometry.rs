//! Pure geometric predicates and measurements.
//!
//! Everything in this module is a free function over explicit numeric
//! arguments so that hit testing can be exercised without constructing
//! shapes. Callers pick the tolerance: small for precise hit tests
//! (typically 5 canvas units), larger for the eraser brush.

use kurbo::{Point, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Whether `p` lies within `tolerance` of the point `q`.
pub fn point_near_point(p: Point, q: Point, tolerance: f64) -> bool {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy <= tolerance * tolerance
}

/// Whether `p` lies within `tolerance` of the segment `a`→`b`.
///
/// Projects the point onto the segment with the projection parameter
/// clamped to [0, 1]. A zero-length segment falls back to point distance.
pub fn point_near_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(p.x - a.x, p.y - a.y);

    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot() <= tolerance;
    }

    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    distance(p, proj) <= tolerance
}

/// Whether `p` lies within `tolerance` of any consecutive segment of a
/// polyline.
pub fn point_near_polyline(p: Point, points: &[Point], tolerance: f64) -> bool {
    if points.len() < 2 {
        return points
            .first()
            .is_some_and(|&q| point_near_point(p, q, tolerance));
    }
    points
        .windows(2)
        .any(|w| point_near_segment(p, w[0], w[1], tolerance))
}

/// Whether `p` is inside the axis-aligned box spanned by `c1` and `c2`
/// (corner order does not matter), inflated by `tolerance`.
pub fn point_in_box(p: Point, c1: Point, c2: Point, tolerance: f64) -> bool {
    let min_x = c1.x.min(c2.x) - tolerance;
    let max_x = c1.x.max(c2.x) + tolerance;
    let min_y = c1.y.min(c2.y) - tolerance;
    let max_y = c1.y.max(c2.y) + tolerance;
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

/// Whether `p` is inside the ellipse inscribed in the box spanned by `c1`
/// and `c2`.
///
/// Normalized test: `(dx/(rx+tol))² + (dy/(ry+tol))² ≤ 1`. Degenerate
/// (zero-radius) axes collapse to the tolerance alone.
pub fn point_in_ellipse(p: Point, c1: Point, c2: Point, tolerance: f64) -> bool {
    let cx = (c1.x + c2.x) / 2.0;
    let cy = (c1.y + c2.y) / 2.0;
    let rx = (c2.x - c1.x).abs() / 2.0 + tolerance;
    let ry = (c2.y - c1.y).abs() / 2.0 + tolerance;
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return false;
    }
    let nx = (p.x - cx) / rx;
    let ny = (p.y - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Whether `p` is inside the triangle `a`-`b`-`c`, or within `tolerance`
/// of one of its edges.
///
/// Barycentric test; a near-zero denominator (degenerate triangle) counts
/// as outside rather than an error.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point, tolerance: f64) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f64::EPSILON {
        return false;
    }

    let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let gamma = 1.0 - alpha - beta;
    if alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0 {
        return true;
    }

    // The barycentric test has no natural inflation; fold the tolerance in
    // as a near-edge band.
    tolerance > 0.0
        && (point_near_segment(p, a, b, tolerance)
            || point_near_segment(p, b, c, tolerance)
            || point_near_segment(p, c, a, tolerance))
}

/// Whether `p` is inside the diamond inscribed in the box spanned by `c1`
/// and `c2`.
///
/// L1 (Minkowski) test against the half-extents:
/// `|dx|/(hw+tol) + |dy|/(hh+tol) ≤ 1`.
pub fn point_in_diamond(p: Point, c1: Point, c2: Point, tolerance: f64) -> bool {
    let cx = (c1.x + c2.x) / 2.0;
    let cy = (c1.y + c2.y) / 2.0;
    let hw = (c2.x - c1.x).abs() / 2.0 + tolerance;
    let hh = (c2.y - c1.y).abs() / 2.0 + tolerance;
    if hw < f64::EPSILON || hh < f64::EPSILON {
        return false;
    }
    (p.x - cx).abs() / hw + (p.y - cy).abs() / hh <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_near_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!(point_near_segment(Point::new(50.0, 3.0), a, b, 5.0));
        assert!(!point_near_segment(Point::new(50.0, 10.0), a, b, 5.0));
        // Projection clamps to the endpoints
        assert!(point_near_segment(Point::new(-3.0, 0.0), a, b, 5.0));
        assert!(!point_near_segment(Point::new(-10.0, 0.0), a, b, 5.0));
    }

    #[test]
    fn test_point_near_degenerate_segment() {
        let a = Point::new(10.0, 10.0);
        assert!(point_near_segment(Point::new(12.0, 10.0), a, a, 5.0));
        assert!(!point_near_segment(Point::new(20.0, 10.0), a, a, 5.0));
    }

    #[test]
    fn test_point_near_polyline() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
        ];
        assert!(point_near_polyline(Point::new(25.0, 2.0), &pts, 5.0));
        assert!(point_near_polyline(Point::new(52.0, 25.0), &pts, 5.0));
        assert!(!point_near_polyline(Point::new(25.0, 25.0), &pts, 5.0));
    }

    #[test]
    fn test_point_in_box_unordered_corners() {
        let c1 = Point::new(100.0, 100.0);
        let c2 = Point::new(0.0, 0.0);
        assert!(point_in_box(Point::new(50.0, 50.0), c1, c2, 0.0));
        assert!(!point_in_box(Point::new(150.0, 50.0), c1, c2, 0.0));
        assert!(point_in_box(Point::new(103.0, 50.0), c1, c2, 5.0));
    }

    #[test]
    fn test_point_in_ellipse() {
        let c1 = Point::new(0.0, 0.0);
        let c2 = Point::new(100.0, 50.0);
        assert!(point_in_ellipse(Point::new(50.0, 25.0), c1, c2, 0.0));
        // Box corner is outside the inscribed ellipse
        assert!(!point_in_ellipse(Point::new(2.0, 2.0), c1, c2, 0.0));
        assert!(point_in_ellipse(Point::new(50.0, 52.0), c1, c2, 5.0));
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Point::new(50.0, 0.0);
        let b = Point::new(0.0, 100.0);
        let c = Point::new(100.0, 100.0);
        assert!(point_in_triangle(Point::new(50.0, 50.0), a, b, c, 0.0));
        assert!(!point_in_triangle(Point::new(0.0, 0.0), a, b, c, 0.0));
        // Near an edge within tolerance
        assert!(point_in_triangle(Point::new(50.0, 102.0), a, b, c, 5.0));
    }

    #[test]
    fn test_degenerate_triangle_is_outside() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(50.0, 0.0);
        let c = Point::new(100.0, 0.0);
        // Collinear vertices: denominator collapses, treated as no match
        assert!(!point_in_triangle(Point::new(50.0, 0.0), a, b, c, 0.0));
    }

    #[test]
    fn test_point_in_diamond() {
        let c1 = Point::new(0.0, 0.0);
        let c2 = Point::new(100.0, 100.0);
        assert!(point_in_diamond(Point::new(50.0, 50.0), c1, c2, 0.0));
        // Center of an edge of the bounding box is a diamond vertex
        assert!(point_in_diamond(Point::new(50.0, 0.0), c1, c2, 0.0));
        // Box corner is outside the diamond
        assert!(!point_in_diamond(Point::new(5.0, 5.0), c1, c2, 0.0));
    }
}
