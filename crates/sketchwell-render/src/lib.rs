//! Renderer abstraction for Sketchwell backends.
//!
//! The engine never draws; backends implement [`Renderer`] and read the
//! engine's views. [`RecordingRenderer`] is a test double that records
//! paint calls.

mod renderer;

pub use renderer::{
    render_frame, RecordingRenderer, RenderContext, RenderResult, Renderer, RendererError,
};
