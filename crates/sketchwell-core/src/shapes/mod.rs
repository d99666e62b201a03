//! Shape definitions for the whiteboard.

mod arrow;
mod diamond;
mod ellipse;
mod line;
mod pencil;
mod rectangle;
mod text;
mod triangle;

pub use arrow::Arrow;
pub use diamond::Diamond;
pub use ellipse::Ellipse;
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::{Text, TextMeasurer};
pub use triangle::Triangle;

use crate::tools::Tool;
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier for a shape.
///
/// Allocated from the document's monotonic counter and never reused, so a
/// shape keeps its id across moves, restyles, and z-order changes. The id is
/// deliberately independent of the storage slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShapeId(pub(crate) u64);

impl ShapeId {
    /// The raw counter value (for display/logging).
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identifier for a group.
pub type GroupId = Uuid;

/// Errors produced by the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("tool {0:?} does not produce a shape")]
    UnsupportedShapeKind(Tool),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Minimum stroke width.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Maximum stroke width.
pub const MAX_STROKE_WIDTH: f64 = 50.0;

/// Style properties shared by all shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Rgba,
    /// Fill color (None = no fill).
    pub fill_color: Option<Rgba>,
    /// Stroke width, clamped to [MIN_STROKE_WIDTH, MAX_STROKE_WIDTH].
    stroke_width: f64,
}

impl ShapeStyle {
    /// Create a style with a clamped stroke width.
    pub fn new(stroke_color: Rgba, fill_color: Option<Rgba>, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            fill_color,
            stroke_width: stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
        }
    }

    /// Get the stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Set the stroke width, clamping to the allowed range.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            fill_color: None,
            stroke_width: 2.0,
        }
    }
}

/// Variant-specific shape geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Triangle(Triangle),
    Diamond(Diamond),
    Arrow(Arrow),
    Pencil(Pencil),
    Text(Text),
}

impl ShapeKind {
    /// Short name of the variant (for logging).
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line(_) => "line",
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::Triangle(_) => "triangle",
            ShapeKind::Diamond(_) => "diamond",
            ShapeKind::Arrow(_) => "arrow",
            ShapeKind::Pencil(_) => "pencil",
            ShapeKind::Text(_) => "text",
        }
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            ShapeKind::Line(s) => s.bounds(),
            ShapeKind::Rectangle(s) => s.bounds(),
            ShapeKind::Ellipse(s) => s.bounds(),
            ShapeKind::Triangle(s) => s.bounds(),
            ShapeKind::Diamond(s) => s.bounds(),
            ShapeKind::Arrow(s) => s.bounds(),
            ShapeKind::Pencil(s) => s.bounds(),
            ShapeKind::Text(s) => s.bounds(),
        }
    }

    /// Whether a canvas-space point hits the body of this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            ShapeKind::Line(s) => s.hit_test(point, tolerance),
            ShapeKind::Rectangle(s) => s.hit_test(point, tolerance),
            ShapeKind::Ellipse(s) => s.hit_test(point, tolerance),
            ShapeKind::Triangle(s) => s.hit_test(point, tolerance),
            ShapeKind::Diamond(s) => s.hit_test(point, tolerance),
            ShapeKind::Arrow(s) => s.hit_test(point, tolerance),
            ShapeKind::Pencil(s) => s.hit_test(point, tolerance),
            ShapeKind::Text(s) => s.hit_test(point, tolerance),
        }
    }

    /// Path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        match self {
            ShapeKind::Line(s) => s.to_path(),
            ShapeKind::Rectangle(s) => s.to_path(),
            ShapeKind::Ellipse(s) => s.to_path(),
            ShapeKind::Triangle(s) => s.to_path(),
            ShapeKind::Diamond(s) => s.to_path(),
            ShapeKind::Arrow(s) => s.to_path(),
            ShapeKind::Pencil(s) => s.to_path(),
            ShapeKind::Text(s) => s.to_path(),
        }
    }

    /// Translate the geometry by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            ShapeKind::Line(s) => s.translate(delta),
            ShapeKind::Rectangle(s) => s.translate(delta),
            ShapeKind::Ellipse(s) => s.translate(delta),
            ShapeKind::Triangle(s) => s.translate(delta),
            ShapeKind::Diamond(s) => s.translate(delta),
            ShapeKind::Arrow(s) => s.translate(delta),
            ShapeKind::Pencil(s) => s.translate(delta),
            ShapeKind::Text(s) => s.translate(delta),
        }
    }

    /// Normalize defining coordinates after a drawing/resizing gesture.
    ///
    /// Box-like shapes end up with the first corner top-left; lines and
    /// arrows only swap when drawn right-to-left (or bottom-up at equal x),
    /// preserving direction otherwise. Applied only at gesture end, never
    /// mid-drag, so dragging in any direction behaves naturally.
    pub fn adjust_orientation(&mut self) {
        match self {
            ShapeKind::Rectangle(s) => s.adjust_orientation(),
            ShapeKind::Ellipse(s) => s.adjust_orientation(),
            ShapeKind::Triangle(s) => s.adjust_orientation(),
            ShapeKind::Diamond(s) => s.adjust_orientation(),
            ShapeKind::Line(s) => s.adjust_orientation(),
            ShapeKind::Arrow(s) => s.adjust_orientation(),
            ShapeKind::Pencil(_) | ShapeKind::Text(_) => {}
        }
    }
}

/// A drawable shape: variant geometry plus the fields every variant shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    /// Paint and hit-test priority; higher is on top. Not required to be
    /// contiguous.
    pub z_index: i64,
    /// Group membership (None = ungrouped).
    pub group_id: Option<GroupId>,
    /// Style properties.
    pub style: ShapeStyle,
    /// Variant geometry.
    pub kind: ShapeKind,
    /// Precomputed renderable path. Derived data: regenerated whenever
    /// geometry or style changes, never the source of truth.
    #[serde(skip)]
    renderable: BezPath,
}

impl Shape {
    /// Create a shape. The renderable path is built immediately.
    pub(crate) fn new(id: ShapeId, kind: ShapeKind, style: ShapeStyle, z_index: i64) -> Self {
        let mut shape = Self {
            id,
            z_index,
            group_id: None,
            style,
            kind,
            renderable: BezPath::new(),
        };
        shape.rebuild_renderable();
        shape
    }

    /// Build the zero-extent shape a drawing tool produces at pointer-down.
    ///
    /// Tools that do not draw (selection, pan, hand, eraser, lock) fail with
    /// [`EngineError::UnsupportedShapeKind`] instead of silently degrading.
    pub fn for_tool(
        id: ShapeId,
        tool: Tool,
        origin: Point,
        style: ShapeStyle,
    ) -> Result<Self, EngineError> {
        let kind = match tool {
            Tool::Line => ShapeKind::Line(Line::new(origin, origin)),
            Tool::Rectangle => ShapeKind::Rectangle(Rectangle::new(origin, origin)),
            Tool::Ellipse => ShapeKind::Ellipse(Ellipse::new(origin, origin)),
            Tool::Triangle => ShapeKind::Triangle(Triangle::new(origin, origin)),
            Tool::Diamond => ShapeKind::Diamond(Diamond::new(origin, origin)),
            Tool::Arrow => ShapeKind::Arrow(Arrow::new(origin, origin)),
            Tool::Pencil => ShapeKind::Pencil(Pencil::from_points(vec![origin])),
            Tool::Text => ShapeKind::Text(Text::new(origin, String::new())),
            Tool::Selection | Tool::Pan | Tool::Hand | Tool::Eraser | Tool::Lock => {
                return Err(EngineError::UnsupportedShapeKind(tool));
            }
        };
        Ok(Self::new(id, kind, style, 0))
    }

    /// The shape's stable identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Whether this shape belongs to a group.
    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        self.kind.bounds()
    }

    /// Whether a canvas-space point hits the body of this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.kind.hit_test(point, tolerance)
    }

    /// The cached renderable path.
    pub fn renderable(&self) -> &BezPath {
        &self.renderable
    }

    /// Regenerate the renderable path from the current geometry.
    ///
    /// Must be called after every geometry or style mutation.
    pub fn rebuild_renderable(&mut self) {
        self.renderable = self.kind.to_path();
    }

    /// Clone this shape under a fresh id, outside any group.
    pub(crate) fn duplicate(&self, id: ShapeId) -> Self {
        let mut clone = self.clone();
        clone.id = id;
        clone.group_id = None;
        clone
    }

    /// Translate the shape and refresh its renderable.
    pub fn translate(&mut self, delta: Vec2) {
        self.kind.translate(delta);
        self.rebuild_renderable();
    }

    /// Normalize coordinates at gesture end and refresh the renderable.
    pub fn adjust_orientation(&mut self) {
        self.kind.adjust_orientation();
        self.rebuild_renderable();
    }
}

/// Normalize two corners so the first is top-left and the second
/// bottom-right. Shared by the box-like variants.
pub(crate) fn normalized_corners(p1: Point, p2: Point) -> (Point, Point) {
    (
        Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
        Point::new(p1.x.max(p2.x), p1.y.max(p2.y)),
    )
}
