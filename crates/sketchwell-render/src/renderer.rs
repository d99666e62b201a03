//! Renderer trait abstraction.

use peniko::Color;
use sketchwell_core::{Engine, Shape, ShapeId};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Paint failed: {0}")]
    PaintFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
///
/// Backends read the engine's views (shapes in paint order, selection,
/// viewport) and never mutate anything; the engine does not wait on them.
pub struct RenderContext<'a> {
    /// The engine to render from.
    pub engine: &'a Engine,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with default colors.
    pub fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// A backend receives one `paint` call per shape, in paint order (back to
/// front), between `begin_frame` and `end_frame`. Shape geometry arrives in
/// canvas space; backends apply the viewport transform from the context.
pub trait Renderer {
    /// Start a frame (clear, set up the transform).
    fn begin_frame(&mut self, _ctx: &RenderContext<'_>) -> RenderResult<()> {
        Ok(())
    }

    /// Paint a single shape from its precomputed renderable path and style.
    fn paint(&mut self, shape: &Shape) -> RenderResult<()>;

    /// Finish the frame (present).
    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Drive a full frame: shapes are painted back to front.
pub fn render_frame(renderer: &mut dyn Renderer, ctx: &RenderContext<'_>) -> RenderResult<()> {
    renderer.begin_frame(ctx)?;
    for shape in ctx.engine.shapes() {
        renderer.paint(shape)?;
    }
    renderer.end_frame()
}

/// A renderer that records paint calls instead of drawing.
///
/// Used in tests to assert paint order and frame structure without a GPU.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Shape ids painted in the current frame, in paint order.
    pub painted: Vec<ShapeId>,
    /// Number of completed frames.
    pub frames: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, _ctx: &RenderContext<'_>) -> RenderResult<()> {
        self.painted.clear();
        Ok(())
    }

    fn paint(&mut self, shape: &Shape) -> RenderResult<()> {
        self.painted.push(shape.id());
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchwell_core::{Modifiers, MouseButton, Tool};

    fn draw_rect(engine: &mut Engine, from: Point, to: Point) -> ShapeId {
        engine.set_tool(Tool::Rectangle);
        engine.pointer_down(from, MouseButton::Left, Modifiers::default());
        engine.pointer_move(to, Modifiers::default());
        engine.pointer_up(to, Modifiers::default());
        engine.selection()[0]
    }

    #[test]
    fn test_paints_back_to_front() {
        let mut engine = Engine::new(800.0, 600.0);
        let a = draw_rect(&mut engine, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = draw_rect(&mut engine, Point::new(30.0, 0.0), Point::new(40.0, 10.0));

        let mut renderer = RecordingRenderer::new();
        render_frame(&mut renderer, &RenderContext::new(&engine)).unwrap();
        assert_eq!(renderer.painted, vec![a, b]);
        assert_eq!(renderer.frames, 1);

        // Layer changes show up in the next frame's paint order
        engine.set_tool(Tool::Selection);
        engine.pointer_down(Point::new(2.0, 5.0), MouseButton::Left, Modifiers::default());
        engine.pointer_up(Point::new(2.0, 5.0), Modifiers::default());
        engine.bring_to_front();

        render_frame(&mut renderer, &RenderContext::new(&engine)).unwrap();
        assert_eq!(renderer.painted, vec![b, a]);
        assert_eq!(renderer.frames, 2);
    }

    #[test]
    fn test_paint_error_stops_frame() {
        struct FailingRenderer;
        impl Renderer for FailingRenderer {
            fn paint(&mut self, _shape: &Shape) -> RenderResult<()> {
                Err(RendererError::PaintFailed("out of surface".into()))
            }
        }

        let mut engine = Engine::new(800.0, 600.0);
        draw_rect(&mut engine, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        let mut renderer = FailingRenderer;
        let result = render_frame(&mut renderer, &RenderContext::new(&engine));
        assert!(result.is_err());
    }
}
