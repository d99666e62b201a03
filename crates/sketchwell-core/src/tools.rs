//! Tool selection.

use serde::{Deserialize, Serialize};

/// Available tools.
///
/// The tool determines what a new pointer-down gesture produces; it is
/// orthogonal to the in-flight action tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Selection,
    Pencil,
    Line,
    Rectangle,
    Triangle,
    Ellipse,
    Diamond,
    Arrow,
    Text,
    Pan,
    Eraser,
    Hand,
    Lock,
}

impl Tool {
    /// Whether a pointer-down with this tool creates a shape.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            Tool::Pencil
                | Tool::Line
                | Tool::Rectangle
                | Tool::Triangle
                | Tool::Ellipse
                | Tool::Diamond
                | Tool::Arrow
                | Tool::Text
        )
    }

    /// Whether this tool pans the canvas on drag.
    pub fn pans(self) -> bool {
        matches!(self, Tool::Pan | Tool::Hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_tools() {
        assert!(Tool::Rectangle.is_drawing());
        assert!(Tool::Pencil.is_drawing());
        assert!(Tool::Text.is_drawing());
        assert!(!Tool::Selection.is_drawing());
        assert!(!Tool::Eraser.is_drawing());
        assert!(!Tool::Lock.is_drawing());
    }

    #[test]
    fn test_panning_tools() {
        assert!(Tool::Pan.pans());
        assert!(Tool::Hand.pans());
        assert!(!Tool::Selection.pans());
    }
}
