//! Text shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Measures text extents for the engine.
///
/// Implemented by the host (font stack, canvas 2D context, terminal cells).
/// The engine only needs the resulting width/height to keep text bounds
/// accurate.
pub trait TextMeasurer {
    /// Measure the rendered extent of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// A text shape: a top-left anchor plus a measured extent.
///
/// Content changes only when an editing session completes; the extent is
/// re-measured at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Top-left anchor.
    pub anchor: Point,
    /// The text content.
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Measured extent (zero until first measured).
    pub size: Size,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text shape with an unmeasured extent.
    pub fn new(anchor: Point, content: String) -> Self {
        Self {
            anchor,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            size: Size::ZERO,
        }
    }

    /// Replace the content and re-measure the extent.
    pub fn set_content(&mut self, content: String, measurer: &dyn TextMeasurer) {
        self.size = measurer.measure(&content, self.font_size);
        self.content = content;
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.anchor, self.size)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let far = Point::new(self.anchor.x + self.size.width, self.anchor.y + self.size.height);
        geometry::point_in_box(point, self.anchor, far, tolerance)
    }

    /// Text has no outline path; the backend paints it from the content.
    pub fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCellMeasurer;

    impl TextMeasurer for FixedCellMeasurer {
        fn measure(&self, text: &str, font_size: f64) -> Size {
            Size::new(text.chars().count() as f64 * font_size * 0.6, font_size * 1.2)
        }
    }

    #[test]
    fn test_set_content_measures_extent() {
        let mut text = Text::new(Point::new(10.0, 10.0), String::new());
        text.set_content("hello".to_string(), &FixedCellMeasurer);
        assert_eq!(text.content, "hello");
        assert!((text.size.width - 5.0 * 20.0 * 0.6).abs() < f64::EPSILON);
        assert!((text.size.height - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_uses_measured_bounds() {
        let mut text = Text::new(Point::new(0.0, 0.0), String::new());
        text.set_content("hi".to_string(), &FixedCellMeasurer);
        assert!(text.hit_test(Point::new(10.0, 10.0), 0.0));
        assert!(!text.hit_test(Point::new(100.0, 10.0), 0.0));
    }

    #[test]
    fn test_unmeasured_text_has_zero_bounds() {
        let text = Text::new(Point::new(5.0, 5.0), "x".to_string());
        assert!(text.bounds().is_zero_area());
    }
}
