//! Viewport state and the screen↔canvas transform pipeline.
//!
//! These conversions are the sole authority for coordinate mapping: hit
//! testing, drawing, and rendering all route through them, so visual and
//! logical positions cannot drift apart.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum zoom scale.
pub const MIN_SCALE: f64 = 0.1;
/// Maximum zoom scale.
pub const MAX_SCALE: f64 = 20.0;

/// Compute the offset that keeps zoom centered on the viewport rather than
/// the canvas origin.
pub fn compute_scale_offset(viewport: Size, scale: f64) -> Vec2 {
    Vec2::new(
        (viewport.width * scale - viewport.width) / 2.0,
        (viewport.height * scale - viewport.height) / 2.0,
    )
}

/// Pan, zoom, and viewport dimensions for the infinite canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom scale, clamped to [MIN_SCALE, MAX_SCALE].
    scale: f64,
    /// Pan offset in canvas units. Unclamped: the canvas is infinite.
    pub pan_offset: Vec2,
    /// Derived centering offset; recomputed whenever the viewport size or
    /// scale changes.
    scale_offset: Vec2,
    /// Viewport size in screen pixels.
    size: Size,
}

impl Viewport {
    /// Create a viewport of the given size at 100% zoom.
    pub fn new(width: f64, height: f64) -> Self {
        let size = Size::new(width, height);
        Self {
            scale: 1.0,
            pan_offset: Vec2::ZERO,
            scale_offset: compute_scale_offset(size, 1.0),
            size,
        }
    }

    /// Current zoom scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Update the viewport dimensions (e.g. on window resize).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.scale_offset = compute_scale_offset(self.size, self.scale);
    }

    /// Set the zoom scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.scale_offset = compute_scale_offset(self.size, self.scale);
    }

    /// Multiply the zoom scale by `factor` (clamped).
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Pan by a delta in canvas units.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Reset pan and zoom.
    pub fn reset(&mut self) {
        self.pan_offset = Vec2::ZERO;
        self.set_scale(1.0);
    }

    /// Convert a screen-space point to canvas space.
    pub fn screen_to_canvas(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.pan_offset.x * self.scale + self.scale_offset.x) / self.scale,
            (p.y - self.pan_offset.y * self.scale + self.scale_offset.y) / self.scale,
        )
    }

    /// Convert a canvas-space point to screen space.
    pub fn canvas_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.pan_offset.x * self.scale - self.scale_offset.x,
            p.y * self.scale + self.pan_offset.y * self.scale - self.scale_offset.y,
        )
    }

    /// Adjust pan and zoom so `bounds` fills the viewport with `padding`
    /// screen pixels on each side.
    pub fn fit_to_content(&mut self, bounds: Rect, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }
        let avail_w = (self.size.width - padding * 2.0).max(1.0);
        let avail_h = (self.size.height - padding * 2.0).max(1.0);
        self.set_scale((avail_w / bounds.width()).min(avail_h / bounds.height()));

        // Place the content center at the viewport center.
        let center = bounds.center();
        self.pan_offset = Vec2::new(
            (self.size.width / 2.0 + self.scale_offset.x) / self.scale - center.x,
            (self.size.height / 2.0 + self.scale_offset.y) / self.scale - center.y,
        );
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_default() {
        let vp = Viewport::new(800.0, 600.0);
        let p = Point::new(123.0, 456.0);
        let canvas = vp.screen_to_canvas(p);
        assert!((canvas.x - p.x).abs() < 1e-10);
        assert!((canvas.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_round_trip_across_scales_and_pans() {
        let mut vp = Viewport::new(1024.0, 768.0);
        for &scale in &[MIN_SCALE, 0.5, 1.0, 1.68, 5.0, MAX_SCALE] {
            for &pan in &[
                Vec2::ZERO,
                Vec2::new(250.0, -130.0),
                Vec2::new(-9999.0, 421.5),
            ] {
                vp.set_scale(scale);
                vp.pan_offset = pan;
                let p = Point::new(314.0, 159.0);
                let back = vp.canvas_to_screen(vp.screen_to_canvas(p));
                assert!((back.x - p.x).abs() < 1e-9, "scale {scale} pan {pan:?}");
                assert!((back.y - p.y).abs() < 1e-9, "scale {scale} pan {pan:?}");
            }
        }
    }

    #[test]
    fn test_scale_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_scale(0.001);
        assert!((vp.scale() - MIN_SCALE).abs() < f64::EPSILON);
        vp.set_scale(1000.0);
        assert!((vp.scale() - MAX_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_centers_on_viewport() {
        let mut vp = Viewport::new(800.0, 600.0);
        let center = Point::new(400.0, 300.0);
        let before = vp.screen_to_canvas(center);
        vp.zoom_by(2.0);
        let after = vp.screen_to_canvas(center);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_scale_offset_formula() {
        let offset = compute_scale_offset(Size::new(800.0, 600.0), 2.0);
        assert!((offset.x - 400.0).abs() < f64::EPSILON);
        assert!((offset.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_content_centers_bounds() {
        let mut vp = Viewport::new(800.0, 600.0);
        let bounds = Rect::new(1000.0, 1000.0, 1200.0, 1100.0);
        vp.fit_to_content(bounds, 50.0);
        let screen_center = vp.canvas_to_screen(bounds.center());
        assert!((screen_center.x - 400.0).abs() < 1e-6);
        assert!((screen_center.y - 300.0).abs() < 1e-6);
    }
}
